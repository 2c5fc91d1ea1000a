//! Brazilian tax identifiers (digits only, punctuation stripped)

use std::fmt;

use crate::domain::value_object::fields::digits;

/// Company tax id, 14 digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnpj(String);

impl Cnpj {
    pub fn new(raw: &str) -> Result<Self, String> {
        let value = digits(raw);
        if value.len() != 14 {
            return Err("CNPJ inválido.".to_string());
        }
        Ok(Self(value))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cnpj {
    /// `12.345.678/0001-90`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.0;
        if d.len() != 14 {
            return f.write_str(d);
        }
        write!(
            f,
            "{}.{}.{}/{}-{}",
            &d[..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..]
        )
    }
}

/// Personal tax id, 11 digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpf(String);

impl Cpf {
    pub fn new(raw: &str) -> Result<Self, String> {
        let value = digits(raw);
        if value.len() != 11 {
            return Err("CPF inválido.".to_string());
        }
        Ok(Self(value))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cpf {
    /// `123.456.789-09`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.0;
        if d.len() != 11 {
            return f.write_str(d);
        }
        write!(f, "{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnpj() {
        let cnpj = Cnpj::new("12.345.678/0001-90").unwrap();
        assert_eq!(cnpj.as_str(), "12345678000190");
        assert_eq!(cnpj.to_string(), "12.345.678/0001-90");
        assert_eq!(Cnpj::new("1234567800019").unwrap_err(), "CNPJ inválido.");
    }

    #[test]
    fn test_cpf() {
        let cpf = Cpf::new("123.456.789-09").unwrap();
        assert_eq!(cpf.as_str(), "12345678909");
        assert_eq!(cpf.to_string(), "123.456.789-09");
        assert!(Cpf::new("").is_err());
    }
}
