use log::{debug, info};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use crate::attack::bsgs::bsgs_solve;
use crate::attack::crt::crt_combine;
use crate::elgamal::eg_keygen::{PublicKey, SecretKey};
use crate::elgamal::eg_encrypt::Ciphertext;
use crate::elgamal::eg_decrypt::eg_decrypt;
use crate::elgamal::math::power;
use crate::crypto_error::CryptoError;

// ============================================================================
// Attaque de Pohlig-Hellman
//
// Pour chaque facteur f_k de p-1 :
//   e_k = (p-1)/f_k,  g_k = g^e_k,  y_k = y^e_k
//   g_k vit dans le sous-groupe d'ordre f_k, donc BSGS(g_k, y_k, f_k)
//   donne x mod f_k en O(sqrt(f_k)).
// Les couples (x mod f_k, f_k) sont recollés par le CRT.
//
// Les facteurs doivent diviser p-1 et être deux à deux premiers entre eux.
// Des puissances de premiers conviennent aussi : BSGS travaille directement
// dans le sous-groupe d'ordre f_k.
//
// Le résultat est x mod Π f_k. Si ce produit ne couvre pas l'ordre de g,
// rien ne permet de le voir ici : c'est à l'appelant de fournir une liste
// complète, ou d'utiliser pohlig_hellman_with_order.
// ============================================================================
pub fn pohlig_hellman(
    p: &BigUint,
    g: &BigUint,
    y: &BigUint,
    factors: &[BigUint],
) -> Result<BigUint, CryptoError> {
    if p < &BigUint::from(3u32) {
        return Err(CryptoError::InvalidInput(format!("module p = {p} < 3")));
    }
    if factors.is_empty() {
        return Err(CryptoError::InvalidInput("liste de facteurs vide".to_string()));
    }

    let group_order = p - BigUint::one();
    let mut residues = Vec::with_capacity(factors.len());

    for f in factors {
        if f < &BigUint::from(2u32) || !(&group_order % f).is_zero() {
            return Err(CryptoError::FactorDoesNotDivideOrder { factor: f.to_string() });
        }

        let exponent = &group_order / f;
        let g_k = power(g, &exponent, p)?;
        let y_k = power(y, &exponent, p)?;

        let x_k = bsgs_solve(&g_k, &y_k, p, f)?;
        debug!("Pohlig-Hellman : x ≡ {x_k} (mod {f})");
        residues.push((x_k, f.clone()));
    }

    let x = crt_combine(&residues)?;
    info!("Pohlig-Hellman : exposant retrouvé modulo le produit de {} facteurs", factors.len());
    Ok(x)
}

// ----------------------------------------------------------------------------
// Variante qui connaît l'ordre attendu (typiquement p-1) :
//   Π f_k < order -> Err(IncompleteFactorization), au lieu d'un x partiel
//   g^x != y      -> Err(DiscreteLogNotFound), pas de résultat deviné
// ----------------------------------------------------------------------------
pub fn pohlig_hellman_with_order(
    p: &BigUint,
    g: &BigUint,
    y: &BigUint,
    factors: &[BigUint],
    order: &BigUint,
) -> Result<BigUint, CryptoError> {
    let covered: BigUint = factors.iter().product();
    if &covered < order {
        return Err(CryptoError::IncompleteFactorization {
            covered: covered.to_string(),
            order:   order.to_string(),
        });
    }

    let x = pohlig_hellman(p, g, y, factors)?;
    if power(g, &x, p)? != y % p {
        return Err(CryptoError::DiscreteLogNotFound { order: order.to_string() });
    }
    Ok(x)
}

// ----------------------------------------------------------------------------
// Enchaîne l'attaque sur la clé publique (q, g, h) et le déchiffrement :
// retrouve l'exposant puis le message sans jamais avoir eu la clé secrète.
//
// L'exposant est vérifié (g^x ≡ h) avant de déchiffrer :
//   Π f_k < q-1 -> Err(IncompleteFactorization)
//   sinon       -> Err(DiscreteLogNotFound)
// ----------------------------------------------------------------------------
pub fn recover_plaintext(
    pk: &PublicKey,
    ct: &Ciphertext,
    factors: &[BigUint],
) -> Result<(SecretKey, BigUint), CryptoError> {
    let x = pohlig_hellman(&pk.q, &pk.g, &pk.h, factors)?;

    if power(&pk.g, &x, &pk.q)? != &pk.h % &pk.q {
        let group_order = &pk.q - BigUint::one();
        let covered: BigUint = factors.iter().product();
        if covered < group_order {
            return Err(CryptoError::IncompleteFactorization {
                covered: covered.to_string(),
                order:   group_order.to_string(),
            });
        }
        return Err(CryptoError::DiscreteLogNotFound { order: group_order.to_string() });
    }

    let sk = SecretKey::new(pk.q.clone(), x);
    let m = eg_decrypt(ct, &sk)?;
    Ok((sk, m))
}
