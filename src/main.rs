// =========================================================
// elgamal_crypto — interface en ligne de commande
//   -c : chiffrer un entier (clé générée à la volée)
//   -d : déchiffrer (c1, c2) avec (x, q)
//   -a : retrouver x par Pohlig-Hellman puis déchiffrer
// =========================================================

use clap::{ArgGroup, Parser};
use env_logger::Env;
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_core::{OsRng, RngCore};
use std::io::{self, Write};

use elgamal_crypto::eg_keygen::{eg_keygen, eg_keygen_weak};
use elgamal_crypto::eg_encrypt::eg_encrypt;
use elgamal_crypto::eg_decrypt::eg_decrypt;
use elgamal_crypto::attack::pohlig_hellman::recover_plaintext;
use elgamal_crypto::key_management::{
    parse_decimal, biguint_to_decimal, keypair_to_json, ciphertext_to_json,
    save_transcript_json, load_keypair_json, EncryptionJson, DecryptionJson, AttackJson,
};
use elgamal_crypto::primes::{PrimeSearch, DEFAULT_MR_ROUNDS};
use elgamal_crypto::{Ciphertext, CryptoError, PublicKey, SecretKey};

// Fin de la liste de facteurs en mode attaque
const FACTOR_TERMINATOR: &str = "-1";

// ─────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "elgamal_crypto", version)]
#[command(about = "Chiffrement ElGamal et attaque de Pohlig-Hellman sur module friable")]
#[command(group(ArgGroup::new("mode").required(true).args(["encrypt", "decrypt", "attack"])))]
struct Args {
    /// Chiffrer un entier m lu sur l'entrée standard
    #[arg(short = 'c', long = "encrypt")]
    encrypt: bool,

    /// Déchiffrer (c1, c2) avec la clé secrète (x, q)
    #[arg(short = 'd', long = "decrypt")]
    decrypt: bool,

    /// Retrouver la clé secrète par Pohlig-Hellman et déchiffrer
    #[arg(short = 'a', long = "attack")]
    attack: bool,

    /// Taille du module q en bits
    #[arg(long, default_value_t = 256)]
    bits: u64,

    /// Tours de Miller-Rabin par candidat (au moins 1)
    #[arg(long, default_value_t = DEFAULT_MR_ROUNDS, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: u32,

    /// Graine du générateur aléatoire (reproductible, NON sûr)
    #[arg(long)]
    seed: Option<u64>,

    /// Générer une clé sur un module friable (cassable avec -a)
    #[arg(long, requires = "encrypt")]
    weak: bool,

    /// Sortie JSON au lieu des lignes `nom = valeur`
    #[arg(long)]
    json: bool,

    /// Enregistrer la transcription du chiffrement dans un fichier JSON
    #[arg(long, value_name = "FICHIER", requires = "encrypt")]
    out: Option<String>,

    /// Lire (x, q) depuis une transcription JSON au lieu de l'entrée standard
    #[arg(long, value_name = "FICHIER", requires = "decrypt")]
    key: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Erreur applicative centrale
//
// Unifie CryptoError, io::Error et serde_json::Error pour
// propager toutes les erreurs via ? jusqu'à main.
// ─────────────────────────────────────────────────────────

#[derive(Debug)]
enum AppError {
    Crypto(CryptoError),
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Crypto(e) => write!(f, "Erreur cryptographique : {}", e),
            AppError::Io(e)     => write!(f, "Erreur I/O : {}", e),
            AppError::Json(e)   => write!(f, "Erreur JSON : {}", e),
        }
    }
}

impl From<CryptoError> for AppError {
    fn from(e: CryptoError) -> Self { AppError::Crypto(e) }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self { AppError::Io(e) }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self { AppError::Json(e) }
}

// ─────────────────────────────────────────────────────────
// Point d'entrée
// ─────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None       => Box::new(OsRng),
    };

    let res = if args.encrypt {
        mode_chiffrement(&args, &mut rng)
    } else if args.decrypt {
        mode_dechiffrement(&args)
    } else {
        mode_attaque(&args)
    };

    if let Err(e) = res {
        eprintln!("[ERREUR] {}", e);
        std::process::exit(1);
    }
}

// ─────────────────────────────────────────────────────────
// Lecture de l'entrée standard
// ─────────────────────────────────────────────────────────

// Invite `label: ` (masquée en mode JSON pour garder stdout exploitable)
fn lire_ligne(label: &str, quiet: bool) -> Result<String, AppError> {
    if !quiet {
        print!("{}: ", label);
        io::stdout().flush()?;
    }
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(CryptoError::InvalidInput(format!("fin de l'entrée avant {label}")).into());
    }
    Ok(input.trim().to_string())
}

fn lire_entier(label: &str, quiet: bool) -> Result<BigUint, AppError> {
    Ok(parse_decimal(&lire_ligne(label, quiet)?)?)
}

// Facteurs un par ligne jusqu'à -1 (ou fin de l'entrée)
fn lire_facteurs(quiet: bool) -> Result<Vec<BigUint>, AppError> {
    let mut factors = Vec::new();
    loop {
        let line = match lire_ligne("factor", quiet) {
            Ok(line) => line,
            Err(AppError::Crypto(CryptoError::InvalidInput(_))) if !factors.is_empty() => break,
            Err(e) => return Err(e),
        };
        if line == FACTOR_TERMINATOR {
            break;
        }
        factors.push(parse_decimal(&line)?);
    }
    Ok(factors)
}

// ─────────────────────────────────────────────────────────
// [-c] Chiffrement
// ─────────────────────────────────────────────────────────

fn mode_chiffrement(args: &Args, rng: &mut impl RngCore) -> Result<(), AppError> {
    let m = lire_entier("m", args.json)?;
    let search = PrimeSearch { rounds: args.rounds, ..PrimeSearch::default() };

    let (kp, factors) = if args.weak {
        let (kp, factors) = eg_keygen_weak(args.bits, &search, rng)?;
        (kp, Some(factors))
    } else {
        (eg_keygen(args.bits, &search, rng)?, None)
    };
    let ct = eg_encrypt(&m, &kp.public_key, rng)?;

    let transcript = EncryptionJson {
        keypair:    keypair_to_json(&kp),
        ciphertext: ciphertext_to_json(&ct),
        factors:    factors
            .as_ref()
            .map(|fs| fs.iter().map(biguint_to_decimal).collect()),
    };
    if let Some(path) = &args.out {
        save_transcript_json(&transcript, path)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    println!("c1 = {}", ct.c1);
    println!("c2 = {}", ct.c2);
    println!("x = {}", kp.secret_key.x);
    println!("q = {}", kp.public_key.q);
    println!("g = {}", kp.public_key.g);
    println!("h = {}", kp.public_key.h);
    if let Some(fs) = factors {
        let list: Vec<String> = fs.iter().map(biguint_to_decimal).collect();
        println!("factors = {}", list.join(" "));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────
// [-d] Déchiffrement
// ─────────────────────────────────────────────────────────

fn mode_dechiffrement(args: &Args) -> Result<(), AppError> {
    let c1 = lire_entier("c1", args.json)?;
    let c2 = lire_entier("c2", args.json)?;

    let sk = match &args.key {
        Some(path) => load_keypair_json(path)?.secret_key,
        None => {
            let x = lire_entier("x", args.json)?;
            let q = lire_entier("q", args.json)?;
            SecretKey::new(q, x)
        }
    };

    let m = eg_decrypt(&Ciphertext { c1, c2 }, &sk)?;

    if args.json {
        let out = DecryptionJson { m: biguint_to_decimal(&m) };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("m = {}", m);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────
// [-a] Attaque de Pohlig-Hellman
// ─────────────────────────────────────────────────────────

fn mode_attaque(args: &Args) -> Result<(), AppError> {
    let g  = lire_entier("g", args.json)?;
    let h  = lire_entier("h", args.json)?;
    let q  = lire_entier("q", args.json)?;
    let c1 = lire_entier("c1", args.json)?;
    let c2 = lire_entier("c2", args.json)?;
    let factors = lire_facteurs(args.json)?;

    let pk = PublicKey { q, g, h };
    let (sk, m) = recover_plaintext(&pk, &Ciphertext { c1, c2 }, &factors)?;

    if args.json {
        let out = AttackJson { x: biguint_to_decimal(&sk.x), m: biguint_to_decimal(&m) };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("x = {}", sk.x);
        println!("m = {}", m);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_must_be_positive() {
        assert!(Args::try_parse_from(["elgamal_crypto", "-c", "--rounds", "0"]).is_err());

        let args = Args::try_parse_from(["elgamal_crypto", "-c", "--rounds", "1"]).unwrap();
        assert_eq!(args.rounds, 1);
        let args = Args::try_parse_from(["elgamal_crypto", "-c"]).unwrap();
        assert_eq!(args.rounds, DEFAULT_MR_ROUNDS);
    }
}
