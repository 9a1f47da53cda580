use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use num_bigint::BigUint;
use num_traits::Num;
use crate::elgamal::eg_keygen::{PublicKey, SecretKey, KeyPair};
use crate::elgamal::eg_encrypt::Ciphertext;
use crate::crypto_error::CryptoError;

// ============================================================================
// Protection DoS parsing — limites de taille des entrées
//
// Les entiers arrivent en décimal depuis stdin ou depuis un fichier JSON.
// BigUint::from_str_radix est quadratique en la longueur : on refuse les
// champs démesurés AVANT toute conversion, et les fichiers trop gros avant
// de les lire.
// ============================================================================

/// Taille maximale d'un fichier de transcription JSON en octets (64 Ko)
const MAX_KEY_FILE_BYTES: u64 = 65_536;

/// Longueur maximale d'un champ décimal (≈ 8300 bits).
pub const MAX_DECIMAL_FIELD_LEN: usize = 2_500;

// ============================================================================
// Structures JSON — tous les entiers en chaînes décimales
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicKeyJson {
    pub q: String,
    pub g: String,
    pub h: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SecretKeyJson {
    pub q: String,
    pub x: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KeyPairJson {
    pub public_key: PublicKeyJson,
    pub secret_key: SecretKeyJson,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CiphertextJson {
    pub c1: String,
    pub c2: String,
}

/// Sortie du mode chiffrement. `factors` n'est présent que pour une clé faible.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EncryptionJson {
    pub keypair:    KeyPairJson,
    pub ciphertext: CiphertextJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors:    Option<Vec<String>>,
}

/// Sortie du mode déchiffrement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DecryptionJson {
    pub m: String,
}

/// Sortie du mode attaque : exposant retrouvé et message en clair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AttackJson {
    pub x: String,
    pub m: String,
}

// ============================================================================
// Conversion BigUint ↔ décimal
// ============================================================================

pub fn biguint_to_decimal(value: &BigUint) -> String {
    value.to_str_radix(10)
}

/// Convertit une chaîne décimale (espaces de bord ignorés) en BigUint.
///
/// Retourne :
///   Err(DecimalFieldTooLong)  si len > MAX_DECIMAL_FIELD_LEN
///   Err(InvalidInput)         si vide, signé ou non décimal
pub fn parse_decimal(text: &str) -> Result<BigUint, CryptoError> {
    let digits = text.trim();
    if digits.len() > MAX_DECIMAL_FIELD_LEN {
        return Err(CryptoError::DecimalFieldTooLong {
            actual:  digits.len(),
            maximum: MAX_DECIMAL_FIELD_LEN,
        });
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CryptoError::InvalidInput(format!("entier décimal attendu, reçu {digits:?}")));
    }
    BigUint::from_str_radix(digits, 10)
        .map_err(|_| CryptoError::InvalidInput(format!("entier décimal attendu, reçu {digits:?}")))
}

// ============================================================================
// Conversion structures Rust → JSON
// ============================================================================

pub fn public_key_to_json(pk: &PublicKey) -> PublicKeyJson {
    PublicKeyJson {
        q: biguint_to_decimal(&pk.q),
        g: biguint_to_decimal(&pk.g),
        h: biguint_to_decimal(&pk.h),
    }
}

pub fn secret_key_to_json(sk: &SecretKey) -> SecretKeyJson {
    SecretKeyJson {
        q: biguint_to_decimal(&sk.q),
        x: biguint_to_decimal(&sk.x),
    }
}

pub fn keypair_to_json(kp: &KeyPair) -> KeyPairJson {
    KeyPairJson {
        public_key: public_key_to_json(&kp.public_key),
        secret_key: secret_key_to_json(&kp.secret_key),
    }
}

pub fn ciphertext_to_json(ct: &Ciphertext) -> CiphertextJson {
    CiphertextJson {
        c1: biguint_to_decimal(&ct.c1),
        c2: biguint_to_decimal(&ct.c2),
    }
}

// ============================================================================
// Conversion JSON → structures Rust
// Validation de cohérence : h == g^x mod q vérifié au chargement d'une paire.
// ============================================================================

pub fn json_to_public_key(json: &PublicKeyJson) -> Result<PublicKey, CryptoError> {
    Ok(PublicKey {
        q: parse_decimal(&json.q)?,
        g: parse_decimal(&json.g)?,
        h: parse_decimal(&json.h)?,
    })
}

pub fn json_to_secret_key(json: &SecretKeyJson) -> Result<SecretKey, CryptoError> {
    Ok(SecretKey::new(parse_decimal(&json.q)?, parse_decimal(&json.x)?))
}

pub fn json_to_keypair(json: &KeyPairJson) -> Result<KeyPair, CryptoError> {
    let pk = json_to_public_key(&json.public_key)?;
    let sk = json_to_secret_key(&json.secret_key)?;
    if sk.q != pk.q {
        return Err(CryptoError::KeyCoherenceError);
    }

    // h est recalculé, jamais repris tel quel du fichier
    let kp = KeyPair::from_parts(pk.q, pk.g, sk.x.clone())?;
    if kp.public_key.h != pk.h {
        return Err(CryptoError::KeyCoherenceError);
    }
    Ok(kp)
}

pub fn json_to_ciphertext(json: &CiphertextJson) -> Result<Ciphertext, CryptoError> {
    Ok(Ciphertext {
        c1: parse_decimal(&json.c1)?,
        c2: parse_decimal(&json.c2)?,
    })
}

// ============================================================================
// Vérification de taille de fichier (DoS protection)
// ============================================================================

fn check_file_size(filepath: &str) -> io::Result<()> {
    let meta = fs::metadata(filepath)?;
    if meta.len() > MAX_KEY_FILE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Fichier trop grand : {} octets (maximum autorisé : {} octets)",
                meta.len(),
                MAX_KEY_FILE_BYTES
            ),
        ));
    }
    Ok(())
}

// ============================================================================
// Sauvegarde / chargement sur disque
// ============================================================================

pub fn save_transcript_json<T: Serialize>(value: &T, filepath: &str) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(filepath, json)?;
    Ok(())
}

/// Recharge la paire de clés d'une transcription de chiffrement (`EncryptionJson`).
pub fn load_keypair_json(filepath: &str) -> io::Result<KeyPair> {
    check_file_size(filepath)?;
    let raw = fs::read_to_string(filepath)?;
    let json: EncryptionJson = serde_json::from_str(&raw)?;
    json_to_keypair(&json.keypair)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_keypair() -> KeyPair {
        KeyPair::from_parts(BigUint::from(23u32), BigUint::from(5u32), BigUint::from(6u32)).unwrap()
    }

    #[test]
    fn test_parse_decimal_accepts_trimmed_digits() {
        assert_eq!(parse_decimal("  12345\n").unwrap(), BigUint::from(12345u32));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        for bad in ["", "   ", "-1", "+7", "12a", "0x10", "1 2"] {
            assert!(
                matches!(parse_decimal(bad), Err(CryptoError::InvalidInput(_))),
                "{bad:?} devrait être refusé"
            );
        }
    }

    #[test]
    fn test_parse_decimal_rejects_oversized_field() {
        let huge = "9".repeat(MAX_DECIMAL_FIELD_LEN + 1);
        assert!(matches!(
            parse_decimal(&huge),
            Err(CryptoError::DecimalFieldTooLong { .. })
        ));
    }

    #[test]
    fn test_keypair_json_is_checked_for_coherence() {
        let mut json = keypair_to_json(&toy_keypair());
        assert_eq!(json.public_key.h, "8");
        assert!(json_to_keypair(&json).is_ok());

        json.public_key.h = "9".to_string();
        assert_eq!(json_to_keypair(&json).unwrap_err(), CryptoError::KeyCoherenceError);
    }

    #[test]
    fn test_encryption_transcript_serde() {
        let kp = toy_keypair();
        let ct = Ciphertext { c1: BigUint::from(2u32), c2: BigUint::from(8u32) };
        let transcript = EncryptionJson {
            keypair:    keypair_to_json(&kp),
            ciphertext: ciphertext_to_json(&ct),
            factors:    None,
        };

        let text = serde_json::to_string(&transcript).unwrap();
        assert!(!text.contains("factors"));
        let back: EncryptionJson = serde_json::from_str(&text).unwrap();
        assert_eq!(json_to_ciphertext(&back.ciphertext).unwrap(), ct);
    }

    #[test]
    fn test_save_and_load_keypair_file() {
        let path = std::env::temp_dir().join(format!("elgamal_keys_{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();

        let kp = toy_keypair();
        let transcript = EncryptionJson {
            keypair:    keypair_to_json(&kp),
            ciphertext: CiphertextJson { c1: "2".to_string(), c2: "8".to_string() },
            factors:    Some(vec!["2".to_string(), "11".to_string()]),
        };
        save_transcript_json(&transcript, &path).unwrap();

        let loaded = load_keypair_json(&path).unwrap();
        assert_eq!(loaded.public_key, kp.public_key);
        assert_eq!(loaded.secret_key.x, kp.secret_key.x);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_decryption_output_json() {
        let out = DecryptionJson { m: biguint_to_decimal(&BigUint::from(1234u32)) };
        let text = serde_json::to_string(&out).unwrap();
        assert_eq!(text, r#"{"m":"1234"}"#);
        let back: DecryptionJson = serde_json::from_str(&text).unwrap();
        assert_eq!(parse_decimal(&back.m).unwrap(), BigUint::from(1234u32));
    }
}
