// ===========================================================================
// Gestion centralisée des erreurs cryptographiques
//
// Tous les modules (elgamal/, attack/, key_management/) retournent ce type.
// Seul le binaire décide d'interrompre le processus : la bibliothèque ne fait
// jamais de panic!/unwrap() sur une entrée de l'appelant.
// ===========================================================================

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CryptoError {
    // --- Erreurs de paramètres d'entrée ---
    /// Entrée générique invalide (texte non décimal, module nul, liste vide…)
    InvalidInput(String),
    /// Champ décimal trop long : conversion BigUint coûteuse, on refuse avant
    DecimalFieldTooLong { actual: usize, maximum: usize },
    /// Taille demandée trop petite pour que la génération ait un sens
    KeySizeTooSmall { requested: u64, minimum: u64 },
    /// c1 ou c2 hors de [0, q)
    CiphertextOutOfRange,
    /// Un facteur fourni à Pohlig-Hellman ne divise pas p-1
    FactorDoesNotDivideOrder { factor: String },

    // --- Préconditions arithmétiques ---
    /// L'inverse modulaire n'existe pas (a ≡ 0 ou gcd != 1)
    NoModularInverse,
    /// L'inverse de Fermat est faux : le module n'est pas premier
    CompositeModulus,
    /// Système CRT dont les modules ne sont pas deux à deux premiers entre eux
    NonCoprimeModuli { modulus: String },
    /// Conversion BigInt -> BigUint échouée (résultat négatif — invariant interne)
    NegativeConversion,

    // --- Logarithme discret ---
    /// BSGS n'a trouvé aucun x dans [0, order)
    DiscreteLogNotFound { order: String },
    /// Le produit des facteurs ne couvre pas l'ordre annoncé
    IncompleteFactorization { covered: String, order: String },

    // --- Bornes de ressources ---
    /// Recherche de premier abandonnée après `attempts` tirages
    PrimeSearchExhausted { attempts: u64 },
    /// Table des pas de bébé plus grande que la borne autorisée
    BsgsTableTooLarge { requested: String, maximum: u64 },

    // --- Transcriptions JSON ---
    /// h != g^x mod q au chargement : transcription incohérente ou falsifiée
    KeyCoherenceError,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::InvalidInput(msg) =>
                write!(f, "Entrée invalide : {msg}"),
            CryptoError::DecimalFieldTooLong { actual, maximum } =>
                write!(f, "Champ décimal trop long : {actual} chiffres (maximum autorisé : {maximum})"),
            CryptoError::KeySizeTooSmall { requested, minimum } =>
                write!(f, "Taille {requested} bits insuffisante, minimum requis : {minimum} bits"),
            CryptoError::CiphertextOutOfRange =>
                write!(f, "Le chiffré (c1, c2) doit être dans [0, q)"),
            CryptoError::FactorDoesNotDivideOrder { factor } =>
                write!(f, "Le facteur {factor} ne divise pas p-1"),
            CryptoError::NoModularInverse =>
                write!(f, "Impossible de calculer l'inverse modulaire"),
            CryptoError::CompositeModulus =>
                write!(f, "Le module n'est pas premier : inverse de Fermat invalide"),
            CryptoError::NonCoprimeModuli { modulus } =>
                write!(f, "Le module {modulus} n'est pas premier avec les autres modules du système CRT"),
            CryptoError::NegativeConversion =>
                write!(f, "Conversion interne BigInt -> BigUint : résultat négatif inattendu"),
            CryptoError::DiscreteLogNotFound { order } =>
                write!(f, "Logarithme discret introuvable dans [0, {order})"),
            CryptoError::IncompleteFactorization { covered, order } =>
                write!(f, "Factorisation incomplète : produit des facteurs {covered} < ordre {order}"),
            CryptoError::PrimeSearchExhausted { attempts } =>
                write!(f, "Aucun premier trouvé après {attempts} tirages"),
            CryptoError::BsgsTableTooLarge { requested, maximum } =>
                write!(f, "Table BSGS de {requested} entrées refusée (maximum : {maximum})"),
            CryptoError::KeyCoherenceError =>
                write!(f, "Transcription de clé incohérente : h != g^x mod q"),
        }
    }
}

impl std::error::Error for CryptoError {}
