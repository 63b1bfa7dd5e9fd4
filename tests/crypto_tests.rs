//! Integration tests for the PassVault crypto module.

use passvault::crypto::envelope::{HEADER_LEN, IV_LEN};
use passvault::crypto::kdf::{derive_entry_key, generate_salt, SALT_LEN};
use passvault::crypto::{from_transport, open, seal, to_transport, SecretGate, SecretPurpose};
use passvault::errors::VaultError;

// ---------------------------------------------------------------------------
// Envelope round-trip
// ---------------------------------------------------------------------------

#[test]
fn seal_open_roundtrip() {
    let plaintext = b"correct horse battery staple";
    let envelope = seal(plaintext, "master-secret").expect("seal should succeed");

    // Fixed layout: 16-byte IV + 16-byte salt + ciphertext + 16-byte tag.
    assert_eq!(envelope.len(), HEADER_LEN + plaintext.len() + 16);

    let recovered = open(&envelope, "master-secret").expect("open should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn seal_produces_a_fresh_envelope_every_call() {
    let plaintext = b"same plaintext";
    let env1 = seal(plaintext, "same-secret").expect("seal 1");
    let env2 = seal(plaintext, "same-secret").expect("seal 2");

    // Fresh salt and IV per call: identical inputs, different envelopes.
    assert_ne!(env1, env2, "two seals of the same plaintext must differ");
    assert_ne!(&env1[..IV_LEN], &env2[..IV_LEN], "IVs must differ");
    assert_ne!(
        &env1[IV_LEN..HEADER_LEN],
        &env2[IV_LEN..HEADER_LEN],
        "salts must differ"
    );

    // Both still decrypt to the same plaintext under the same secret.
    assert_eq!(open(&env1, "same-secret").unwrap(), plaintext);
    assert_eq!(open(&env2, "same-secret").unwrap(), plaintext);
}

#[test]
fn open_is_deterministic() {
    let envelope = seal(b"stable", "secret-a").unwrap();
    let first = open(&envelope, "secret-a").unwrap();
    let second = open(&envelope, "secret-a").unwrap();
    assert_eq!(first, second);
}

#[test]
fn open_with_wrong_secret_fails() {
    let envelope = seal(b"top secret", "right-secret").unwrap();
    let result = open(&envelope, "wrong-secret");

    assert!(matches!(result, Err(VaultError::DecryptionFailure)));
}

#[test]
fn short_buffer_is_malformed_not_a_crash() {
    for len in [0usize, 1, 15, 16, 31] {
        let buf = vec![0u8; len];
        let result = open(&buf, "any-secret");
        assert!(
            matches!(result, Err(VaultError::MalformedEnvelope)),
            "length {len} must be malformed"
        );
    }
}

#[test]
fn header_only_buffer_fails_as_decryption_failure() {
    // Exactly 32 bytes parses structurally but has no ciphertext or tag.
    let buf = vec![0u8; HEADER_LEN];
    let result = open(&buf, "any-secret");
    assert!(matches!(result, Err(VaultError::DecryptionFailure)));
}

#[test]
fn corrupted_ciphertext_fails() {
    let mut envelope = seal(b"integrity matters", "secret").unwrap();
    let last = envelope.len() - 1;
    envelope[last] ^= 0xFF;

    assert!(matches!(
        open(&envelope, "secret"),
        Err(VaultError::DecryptionFailure)
    ));
}

#[test]
fn corrupted_header_fails_the_same_way_as_a_wrong_secret() {
    // Flipping IV or salt bytes must be indistinguishable from a wrong
    // secret: the same single error kind, no oracle.
    let envelope = seal(b"payload", "secret").unwrap();

    let mut bad_iv = envelope.clone();
    bad_iv[0] ^= 0xFF;
    assert!(matches!(
        open(&bad_iv, "secret"),
        Err(VaultError::DecryptionFailure)
    ));

    let mut bad_salt = envelope;
    bad_salt[IV_LEN] ^= 0xFF;
    assert!(matches!(
        open(&bad_salt, "secret"),
        Err(VaultError::DecryptionFailure)
    ));
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

#[test]
fn derive_entry_key_same_inputs_same_output() {
    let salt = generate_salt();
    assert_eq!(salt.len(), SALT_LEN);

    let key1 = derive_entry_key(b"my-master-secret", &salt).expect("derive 1");
    let key2 = derive_entry_key(b"my-master-secret", &salt).expect("derive 2");

    assert_eq!(key1, key2, "same secret + salt must produce the same key");
}

#[test]
fn derive_entry_key_different_salts_different_keys() {
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_entry_key(b"same-secret", &salt1).expect("derive 1");
    let key2 = derive_entry_key(b"same-secret", &salt2).expect("derive 2");

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn derive_entry_key_different_secrets_different_keys() {
    let salt = generate_salt();

    let key1 = derive_entry_key(b"secret-one", &salt).expect("derive 1");
    let key2 = derive_entry_key(b"secret-two", &salt).expect("derive 2");

    assert_ne!(key1, key2, "different secrets must produce different keys");
}

// ---------------------------------------------------------------------------
// Verification gate
// ---------------------------------------------------------------------------

#[test]
fn gate_verifies_its_own_hash() {
    let gate = SecretGate::new(SecretPurpose::Login);
    let hash = gate.hash("hunter2hunter2").unwrap();

    assert!(gate.verify("hunter2hunter2", &hash));
    assert!(!gate.verify("hunter2wrong!", &hash));
}

#[test]
fn gate_salts_every_hash_independently() {
    let gate = SecretGate::new(SecretPurpose::Master);
    let hash1 = gate.hash("the-same-secret").unwrap();
    let hash2 = gate.hash("the-same-secret").unwrap();

    // Per-call random salt: two hashes of one secret differ...
    assert_ne!(hash1, hash2);

    // ...but both verify.
    assert!(gate.verify("the-same-secret", &hash1));
    assert!(gate.verify("the-same-secret", &hash2));
}

#[test]
fn gate_purposes_are_never_substitutable() {
    // Even when the two underlying secrets are the identical string, a hash
    // written by one gate must never verify through the other.
    let login = SecretGate::new(SecretPurpose::Login);
    let master = SecretGate::new(SecretPurpose::Master);

    let login_hash = login.hash("identical-secret").unwrap();
    let master_hash = master.hash("identical-secret").unwrap();

    assert!(login.verify("identical-secret", &login_hash));
    assert!(master.verify("identical-secret", &master_hash));

    assert!(!master.verify("identical-secret", &login_hash));
    assert!(!login.verify("identical-secret", &master_hash));
}

#[test]
fn malformed_stored_hashes_verify_as_false() {
    let gate = SecretGate::new(SecretPurpose::Login);

    assert!(!gate.verify("whatever", ""));
    assert!(!gate.verify("whatever", "not-a-phc-string"));
    assert!(!gate.verify("whatever", "$argon2id$v=19$garbage"));
    assert!(!gate.verify("whatever", "$unknown$v=1$m=1$x"));
}

// ---------------------------------------------------------------------------
// Transport encoding
// ---------------------------------------------------------------------------

#[test]
fn transport_encoding_roundtrips() {
    let envelope = seal(b"boundary bytes", "secret").unwrap();

    let encoded = to_transport(&envelope);
    let decoded = from_transport(&encoded).unwrap();
    assert_eq!(decoded, envelope);

    // The transport form still opens.
    assert_eq!(open(&decoded, "secret").unwrap(), b"boundary bytes");
}

#[test]
fn invalid_transport_encoding_is_malformed() {
    assert!(matches!(
        from_transport("!!! definitely not base64 !!!"),
        Err(VaultError::MalformedEnvelope)
    ));
}
