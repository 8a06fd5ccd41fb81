//! Property-based tests for field normalization and name encoding.

use super::{normalize, NameFields, NamingDefaults, SEQUENCE_MODULUS};
use proptest::prelude::*;

fn field_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,8}"
}

fn fields_strategy() -> impl Strategy<Value = NameFields> {
    (
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
    )
        .prop_map(|(u, t, p, r, e, f)| NameFields::new(u, t, p, r, e, f))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Normalizing twice gives the same result as normalizing once
    #[test]
    fn normalize_is_idempotent(value in field_strategy(), width in 1usize..6) {
        let default = "X".repeat(width);
        let once = normalize(&value, width, &default);
        let twice = normalize(&once, width, &default);
        prop_assert_eq!(once, twice);
    }

    // Output never exceeds the field width
    #[test]
    fn normalize_respects_width(value in field_strategy(), width in 1usize..6) {
        let default = "X".repeat(width);
        prop_assert!(normalize(&value, width, &default).chars().count() <= width);
    }

    // Non-empty input is upper-cased and cut, never trimmed
    #[test]
    fn normalize_only_uppercases_and_truncates(value in "[a-zA-Z0-9 ]{1,8}", width in 1usize..6) {
        let expected: String = value.to_uppercase().chars().take(width).collect();
        prop_assert_eq!(normalize(&value, width, "X"), expected);
    }

    // Field-level idempotence carries over to the whole record
    #[test]
    fn normalized_fields_are_stable(fields in fields_strategy()) {
        let defaults = NamingDefaults::default();
        let once = fields.normalize(&defaults);
        let again = NameFields::new(
            once.unit_code(),
            once.server_type(),
            once.provider(),
            once.region(),
            once.environment(),
            once.function(),
        )
        .normalize(&defaults);
        prop_assert_eq!(once, again);
    }

    // The encoded name is the base pattern plus exactly three digits
    #[test]
    fn encode_appends_three_digits(fields in fields_strategy(), seq in 1u32..100_000) {
        let normalized = fields.normalize(&NamingDefaults::default());
        let name = normalized.encode(seq);
        let base = normalized.base_pattern();
        prop_assert!(name.starts_with(&base));
        let suffix = &name[base.len()..];
        prop_assert_eq!(suffix.len(), 3);
        prop_assert_eq!(suffix.parse::<u32>().unwrap(), seq % SEQUENCE_MODULUS);
    }
}
