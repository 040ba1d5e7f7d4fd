//! Integration tests for note address derivation

mod common;

use std::collections::HashSet;

use ::common::address::create_program_address;
use ::common::crypto::SecretKey;
use ::common::program::{derive_note_address, NOTES_PROGRAM_ID};

#[test]
fn test_distinct_owners_distinct_addresses() {
    let addresses: HashSet<_> = (0..64)
        .map(|_| derive_note_address(&NOTES_PROGRAM_ID, &SecretKey::generate().public()))
        .map(|derived| derived.unwrap().0)
        .collect();
    assert_eq!(addresses.len(), 64);
}

#[test]
fn test_derive_is_idempotent() {
    let owner = SecretKey::generate().public();
    let first = derive_note_address(&NOTES_PROGRAM_ID, &owner).unwrap();
    for _ in 0..8 {
        assert_eq!(derive_note_address(&NOTES_PROGRAM_ID, &owner), Ok(first));
    }
}

#[test]
fn test_bump_is_smallest_valid() {
    let owner = SecretKey::generate().public();
    let (address, bump) = derive_note_address(&NOTES_PROGRAM_ID, &owner).unwrap();
    let seeds: &[&[u8]] = &[b"note", owner.as_ref()];

    for lower in 0..bump {
        assert!(create_program_address(seeds, lower, &NOTES_PROGRAM_ID).is_err());
    }
    assert_eq!(
        create_program_address(seeds, bump, &NOTES_PROGRAM_ID).unwrap(),
        address
    );
}

#[tokio::test]
async fn test_stored_bump_matches_derivation() {
    let (_harness, alice) = common::setup_with_note().await;
    let (address, bump) = derive_note_address(&NOTES_PROGRAM_ID, &alice.public()).unwrap();

    assert_eq!(alice.note_address().unwrap(), address);
    assert_eq!(alice.note().await.unwrap().unwrap().bump, bump);
}
