use std::process::{Command, Stdio};

use assert_cmd::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tempfile::TempDir;

fn srvname(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("srvname").expect("failed to locate srvname binary");
    cmd.arg("--data-dir")
        .arg(data_dir.path())
        .env_remove("SRVNAME_DB_PATH");
    cmd
}

fn reserve_unit(data_dir: &TempDir, unit: &str) {
    let mut cmd = srvname(data_dir);
    cmd.stdout(Stdio::null()).stderr(Stdio::null());
    let status = cmd
        .args(["--quiet", "reserve", "--unit", unit, "--region", "EU"])
        .status()
        .expect("failed to execute srvname reserve");
    assert!(status.success(), "srvname reserve command failed");
}

fn bench_cli_startup(c: &mut Criterion) {
    c.bench_function("cli_startup_version", |b| {
        b.iter(|| {
            let mut cmd = Command::cargo_bin("srvname").expect("failed to locate srvname binary");
            let output = cmd.arg("--version").output().expect("failed to run srvname");
            black_box(output);
        });
    });
}

fn bench_cli_reserve(c: &mut Criterion) {
    c.bench_function("cli_reserve", |b| {
        b.iter_batched(
            || TempDir::new().expect("failed to create temp dir"),
            |data_dir| {
                let mut cmd = srvname(&data_dir);
                cmd.stdout(Stdio::null()).stderr(Stdio::null());
                let status = cmd
                    .args(["--quiet", "reserve", "--unit", "AB"])
                    .status()
                    .expect("failed to execute srvname reserve");

                black_box(status.success());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_cli_list(c: &mut Criterion) {
    c.bench_function("cli_list", |b| {
        b.iter_batched(
            || {
                let data_dir = TempDir::new().expect("failed to create temp dir");
                for unit in ["AB", "CD", "EF", "GH", "IJ"] {
                    for _ in 0..10 {
                        reserve_unit(&data_dir, unit);
                    }
                }
                data_dir
            },
            |data_dir| {
                let output = srvname(&data_dir)
                    .args(["list", "--format", "json"])
                    .output()
                    .expect("failed to execute srvname list");

                black_box(output);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_cli_startup, bench_cli_reserve, bench_cli_list);
criterion_main!(benches);
