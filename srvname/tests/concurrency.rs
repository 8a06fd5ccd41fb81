//! Concurrent access tests.
//!
//! Each thread opens its own connection to a shared on-disk database, the
//! same way separate processes would.

mod common;

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use common::{database_dir, open_database, sample_fields, service_at};
use srvname::{ErrorKind, ServiceConfig};

const THREADS: usize = 8;

#[test]
fn test_concurrent_reserves_get_distinct_sequences() {
    let (_dir, path) = database_dir();
    drop(open_database(&path));

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut service = service_at(&path, ServiceConfig::new());
                barrier.wait();
                service.reserve(&sample_fields()).unwrap()
            })
        })
        .collect();

    let names: HashSet<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().server_name)
        .collect();
    assert_eq!(names.len(), THREADS);

    let service = service_at(&path, ServiceConfig::new());
    let mut sequences: Vec<u32> = service
        .list_all()
        .unwrap()
        .iter()
        .map(srvname::Reservation::sequence_num)
        .collect();
    sequences.sort_unstable();
    let expected: Vec<u32> = (1..=u32::try_from(THREADS).unwrap()).collect();
    assert_eq!(sequences, expected);
}

#[test]
fn test_concurrent_commits_exactly_one_wins() {
    let (_dir, path) = database_dir();
    let id = service_at(&path, ServiceConfig::new())
        .reserve(&sample_fields())
        .unwrap()
        .reservation_id;

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut service = service_at(&path, ServiceConfig::new());
                barrier.wait();
                service.commit(&id)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let failure = results.into_iter().find_map(Result::err).unwrap();
    assert_eq!(failure.kind(), ErrorKind::Conflict);
}

#[test]
fn test_concurrent_releases_exactly_one_wins() {
    let (_dir, path) = database_dir();
    let id = {
        let mut service = service_at(&path, ServiceConfig::new());
        let id = service.reserve(&sample_fields()).unwrap().reservation_id;
        service.commit(&id).unwrap();
        id
    };

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut service = service_at(&path, ServiceConfig::new());
                barrier.wait();
                service.release(&id)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let failure = results.into_iter().find_map(Result::err).unwrap();
    assert_eq!(failure.kind(), ErrorKind::InvalidState);

    let stored = service_at(&path, ServiceConfig::new()).get(&id).unwrap();
    assert_eq!(stored.status(), srvname::ReservationStatus::Reserved);
}

#[test]
fn test_concurrent_reserves_across_keys() {
    let (_dir, path) = database_dir();
    drop(open_database(&path));

    let regions = ["EU", "US", "AP", "SA"];
    let handles: Vec<_> = regions
        .iter()
        .flat_map(|region| std::iter::repeat(*region).take(3))
        .map(|region| {
            let path = path.clone();
            thread::spawn(move || {
                let mut service = service_at(&path, ServiceConfig::new());
                let fields = srvname::NameFields::new("AB", "V", "X", region, "P", "SV");
                service.reserve(&fields).unwrap().server_name
            })
        })
        .collect();

    let names: HashSet<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert_eq!(names.len(), 12);

    for region in regions {
        for seq in 1..=3 {
            assert!(names.contains(&format!("ABVX{region}PSV{seq:03}")));
        }
    }
}
