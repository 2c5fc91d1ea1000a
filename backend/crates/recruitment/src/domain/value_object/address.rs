//! Structured postal address

use std::fmt;

use crate::domain::value_object::fields::{FieldErrors, digits};

/// Brazilian federative units
const UF: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR",
    "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Raw address fields as typed into a form
#[derive(Debug, Clone, Default)]
pub struct AddressInput {
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub complement: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// CEP, 8 digits
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    /// UF, upper-case
    pub state: String,
    pub complement: Option<String>,
}

impl Address {
    /// Validate every field, recording problems in `errors`.
    pub fn parse(input: &AddressInput, errors: &mut FieldErrors) -> Option<Self> {
        let before = errors.len();

        let postal_code = digits(&input.postal_code);
        if input.postal_code.trim().is_empty() {
            errors.push("CEP é obrigatório.");
        } else if postal_code.len() != 8 {
            errors.push("CEP inválido.");
        }
        let street = errors.required(&input.street, "Endereço é obrigatório.");
        let number = errors.required(&input.number, "Número é obrigatório.");
        let district = errors.required(&input.district, "Bairro é obrigatório.");
        let city = errors.required(&input.city, "Cidade é obrigatória.");

        let state = input.state.trim().to_uppercase();
        if state.is_empty() {
            errors.push("Estado é obrigatório.");
        } else if !UF.contains(&state.as_str()) {
            errors.push("Estado inválido.");
        }

        if errors.len() > before {
            return None;
        }
        Some(Self {
            postal_code,
            street,
            number,
            district,
            city,
            state,
            complement: FieldErrors::optional(&input.complement),
        })
    }

    /// `12345-678`
    pub fn formatted_postal_code(&self) -> String {
        match self.postal_code.len() {
            8 => format!("{}-{}", &self.postal_code[..5], &self.postal_code[5..]),
            _ => self.postal_code.clone(),
        }
    }

    pub fn to_input(&self) -> AddressInput {
        AddressInput {
            postal_code: self.formatted_postal_code(),
            street: self.street.clone(),
            number: self.number.clone(),
            district: self.district.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            complement: self.complement.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.street, self.number)?;
        if let Some(complement) = &self.complement {
            write!(f, " ({complement})")?;
        }
        write!(
            f,
            " - {}, {}/{} - CEP {}",
            self.district,
            self.city,
            self.state,
            self.formatted_postal_code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> AddressInput {
        AddressInput {
            postal_code: "01310-100".into(),
            street: "Av. Paulista".into(),
            number: "1000".into(),
            district: "Bela Vista".into(),
            city: "São Paulo".into(),
            state: "sp".into(),
            complement: "".into(),
        }
    }

    #[test]
    fn test_parse_normalises() {
        let mut errors = FieldErrors::new();
        let address = Address::parse(&input(), &mut errors).unwrap();
        assert!(errors.is_empty());
        assert_eq!(address.postal_code, "01310100");
        assert_eq!(address.state, "SP");
        assert_eq!(address.complement, None);
        assert_eq!(
            address.to_string(),
            "Av. Paulista, 1000 - Bela Vista, São Paulo/SP - CEP 01310-100"
        );
    }

    #[test]
    fn test_parse_reports_each_field() {
        let mut errors = FieldErrors::new();
        let bad = AddressInput {
            postal_code: "123".into(),
            state: "XX".into(),
            ..AddressInput::default()
        };
        assert!(Address::parse(&bad, &mut errors).is_none());
        let errors = errors.into_vec();
        assert!(errors.contains(&"CEP inválido.".to_string()));
        assert!(errors.contains(&"Cidade é obrigatória.".to_string()));
        assert!(errors.contains(&"Estado inválido.".to_string()));
        assert_eq!(errors.len(), 6);
    }
}
