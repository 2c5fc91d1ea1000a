//! Closed catalogs used as exact-match search facets
//!
//! Each catalog has a stable code (stored and sent by forms) and a label
//! shown on pages.

use std::fmt;

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $name:ident {
            missing: $missing:literal,
            invalid: $invalid:literal,
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub const fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }

            /// Blank input is `None`; an unknown code is an error
            pub fn parse_optional(raw: &str) -> Result<Option<Self>, String> {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(None);
                }
                Self::from_code(raw).map(Some).ok_or_else(|| $invalid.to_string())
            }

            pub fn parse_required(raw: &str) -> Result<Self, String> {
                Self::parse_optional(raw)?.ok_or_else(|| $missing.to_string())
            }

            /// `(code, label)` pairs for a `<select>`
            pub fn options() -> Vec<(&'static str, &'static str)> {
                Self::ALL.iter().map(|v| (v.code(), v.label())).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

catalog! {
    /// Monthly salary range
    SalaryBand {
        missing: "Faixa salarial é obrigatória.",
        invalid: "Faixa salarial inválida.",
        UpTo2000 => ("ate_2000", "Até R$ 2.000"),
        From2000To4000 => ("2000_4000", "R$ 2.000 a R$ 4.000"),
        From4000To6000 => ("4000_6000", "R$ 4.000 a R$ 6.000"),
        From6000To10000 => ("6000_10000", "R$ 6.000 a R$ 10.000"),
        Above10000 => ("acima_10000", "Acima de R$ 10.000"),
    }
}

catalog! {
    ContractType {
        missing: "Tipo de contrato é obrigatório.",
        invalid: "Tipo de contrato inválido.",
        Clt => ("clt", "CLT"),
        Pj => ("pj", "PJ"),
        Internship => ("estagio", "Estágio"),
        Temporary => ("temporario", "Temporário"),
        Freelancer => ("freelancer", "Freelancer"),
    }
}

catalog! {
    WorkMode {
        missing: "Modalidade é obrigatória.",
        invalid: "Modalidade inválida.",
        OnSite => ("presencial", "Presencial"),
        Remote => ("remoto", "Remoto"),
        Hybrid => ("hibrido", "Híbrido"),
    }
}

catalog! {
    /// How soon the position starts, or how soon a candidate can start
    Availability {
        missing: "Disponibilidade é obrigatória.",
        invalid: "Disponibilidade inválida.",
        Immediate => ("imediata", "Imediata"),
        FifteenDays => ("15_dias", "15 dias"),
        ThirtyDays => ("30_dias", "30 dias"),
        Negotiable => ("a_combinar", "A combinar"),
    }
}
