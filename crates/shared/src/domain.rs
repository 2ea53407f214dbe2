use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Query parameter that carries the session identifier from the login page
/// to the dashboard page.
pub const SESSION_QUERY_PARAM: &str = "sessionId";

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_newtype!(SessionId);
string_newtype!(ProgramCode);

impl SessionId {
    /// Reads the session identifier from a page address. Absent or empty
    /// values yield `None`.
    pub fn from_page_url(url: &Url) -> Option<Self> {
        url.query_pairs()
            .find(|(key, _)| key == SESSION_QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .map(Self)
    }

    /// Returns `page` with this session identifier set as its query parameter,
    /// replacing any identifier already present.
    pub fn attach_to(&self, page: &Url) -> Url {
        let mut url = page.clone();
        let retained: Vec<(String, String)> = page
            .query_pairs()
            .filter(|(key, _)| key != SESSION_QUERY_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (key, value) in &retained {
                pairs.append_pair(key, value);
            }
            pairs.append_pair(SESSION_QUERY_PARAM, &self.0);
        }
        url
    }
}

/// Login form payload. Lives for a single submit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub rut: String,
    pub password: String,
}

/// An academic program ("carrera") the user is enrolled in.
///
/// The enrollment fields are echoed back verbatim when requesting the
/// subject list, the server needs them to locate the grade sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(rename = "crrCodigo")]
    pub code: ProgramCode,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(
        rename = "valorCompleto",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub full_value: Option<String>,
    #[serde(rename = "pcaCodigo", default, skip_serializing_if = "Option::is_none")]
    pub plan_code: Option<String>,
    #[serde(
        rename = "alcAnoIngreso",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub admission_year: Option<String>,
    #[serde(rename = "alcPeriodo", default, skip_serializing_if = "Option::is_none")]
    pub admission_period: Option<String>,
}

impl Program {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: ProgramCode(code.into()),
            name: name.into(),
            full_value: None,
            plan_code: None,
            admission_year: None,
            admission_period: None,
        }
    }
}

/// A course within a program. An average of `0` means no grade has been
/// computed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "promedio")]
    pub average: f64,
}

/// Initial dashboard data, fetched once per page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(rename = "nombreUsuario")]
    pub user_display_name: String,
    #[serde(rename = "carreras", default)]
    pub programs: Vec<Program>,
}

impl DashboardSnapshot {
    pub fn program(&self, code: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.code.as_str() == code)
    }

    pub fn default_program(&self) -> Option<&Program> {
        self.programs.first()
    }
}
