use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password is too short (minimum 8 characters)")]
  PasswordTooShort,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid token format")]
  InvalidToken,
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation, trimming surrounding whitespace
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into().trim().to_string();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    // Normalize to lowercase
    Ok(Self(email.to_lowercase()))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 8;
  const MAX_LENGTH: usize = 128;

  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.len() < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id PHC string)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Wraps an existing PHC hash string after checking it parses
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// SessionToken Value Object (Random Secure Token)
// ============================================================================

#[derive(Clone)]
pub struct SessionToken(String);

impl SessionToken {
  const TOKEN_LENGTH: usize = 32; // 32 bytes = 256 bits

  /// Generates a new random session token
  pub fn generate() -> Self {
    use rand::RngCore;

    let mut token = [0u8; Self::TOKEN_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut token);

    Self(hex::encode(token))
  }

  /// Parses a token received from a client
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();

    if token.len() != Self::TOKEN_LENGTH * 2 {
      return Err(ValueObjectError::InvalidToken);
    }

    if !token.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token))
  }

  /// SHA-256 of the token; only the hash is persisted
  pub fn hash(&self) -> TokenHash {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(self.0.as_bytes());

    TokenHash(hex::encode(hasher.finalize()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

// ============================================================================
// TokenHash Value Object (SHA-256 Hash of Token)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHash(String);

impl TokenHash {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for TokenHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_is_normalized() {
    let email = Email::new("  Leader@Example.COM ").unwrap();
    assert_eq!(email.as_str(), "leader@example.com");
  }

  #[test]
  fn test_email_rejects_garbage() {
    assert!(Email::new("not-an-email").is_err());
    assert!(Email::new("").is_err());
  }

  #[test]
  fn test_password_length_bounds() {
    assert!(matches!(
      Password::new("short"),
      Err(ValueObjectError::PasswordTooShort)
    ));
    assert!(matches!(
      Password::new("x".repeat(129)),
      Err(ValueObjectError::PasswordTooLong)
    ));
    assert!(Password::new("correct horse").is_ok());
  }

  #[test]
  fn test_password_debug_is_redacted() {
    let password = Password::new("super-secret").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
  }

  #[test]
  fn test_password_hash_rejects_non_phc_strings() {
    assert!(PasswordHash::from_hash("plaintext").is_err());
  }

  #[test]
  fn test_session_token_generate_and_parse() {
    let token = SessionToken::generate();
    assert_eq!(token.as_str().len(), 64);

    let parsed = SessionToken::from_string(token.as_str()).unwrap();
    assert_eq!(parsed.hash(), token.hash());
  }

  #[test]
  fn test_session_token_rejects_invalid_input() {
    assert!(SessionToken::from_string("abc").is_err());
    assert!(SessionToken::from_string("z".repeat(64)).is_err());
  }

  #[test]
  fn test_token_hash_is_sha256_hex() {
    let token = SessionToken::generate();
    let hash = token.hash();
    assert_eq!(hash.as_str().len(), 64);
    assert_ne!(hash.as_str(), token.as_str());
  }
}
