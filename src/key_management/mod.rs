pub mod key_storage;

// Réexportations key_storage
pub use key_storage::{
    PublicKeyJson, SecretKeyJson, KeyPairJson, CiphertextJson, EncryptionJson, DecryptionJson, AttackJson,
    MAX_DECIMAL_FIELD_LEN,
    biguint_to_decimal, parse_decimal,
    public_key_to_json, secret_key_to_json, keypair_to_json, ciphertext_to_json,
    json_to_public_key, json_to_secret_key, json_to_keypair, json_to_ciphertext,
    save_transcript_json, load_keypair_json,
};
