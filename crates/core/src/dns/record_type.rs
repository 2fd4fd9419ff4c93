//! Record Types

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

/// DNS record type, encoded by the provider as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Text
    Txt,
    /// Mail exchanger
    Mx,
    /// Sender policy
    Spf,
    /// Provider CNAME flattening
    Flatten,
    /// Provider pull zone link
    PullZone,
    /// Service locator
    Srv,
    /// Certification authority authorization
    Caa,
    /// Pointer
    Ptr,
    /// Provider scripted record
    Script,
    /// Name server
    Ns,
    /// A code this proxy does not know about.
    Unknown(i64),
}

const KNOWN: [(RecordType, i64, &str); 13] = [
    (RecordType::A, 0, "A"),
    (RecordType::Aaaa, 1, "AAAA"),
    (RecordType::Cname, 2, "CNAME"),
    (RecordType::Txt, 3, "TXT"),
    (RecordType::Mx, 4, "MX"),
    (RecordType::Spf, 5, "SPF"),
    (RecordType::Flatten, 6, "Flatten"),
    (RecordType::PullZone, 7, "PullZone"),
    (RecordType::Srv, 8, "SRV"),
    (RecordType::Caa, 9, "CAA"),
    (RecordType::Ptr, 10, "PTR"),
    (RecordType::Script, 11, "Script"),
    (RecordType::Ns, 12, "NS"),
];

impl RecordType {
    /// Translate a provider code. Unrecognised codes are preserved as [`RecordType::Unknown`].
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        KNOWN
            .iter()
            .find(|(_, known, _)| *known == code)
            .map_or(Self::Unknown(code), |(record_type, _, _)| *record_type)
    }

    /// Look up a type by its human-readable name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        KNOWN
            .iter()
            .find(|(_, _, known)| known.eq_ignore_ascii_case(name.trim()))
            .map(|(record_type, _, _)| *record_type)
    }

    /// Provider code for this type.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Unknown(code) => code,
            known => KNOWN
                .iter()
                .find(|(record_type, _, _)| *record_type == known)
                .map_or(-1, |(_, code, _)| *code),
        }
    }

    /// Canonical name used in permission grants. Unknown codes have an empty name, which no
    /// restricted grant can match.
    #[must_use]
    pub fn name(self) -> &'static str {
        KNOWN
            .iter()
            .find(|(record_type, _, _)| *record_type == self)
            .map_or("", |(_, _, name)| name)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown({code})"),
            known => f.write_str(known.name()),
        }
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireRecordType {
    Code(i64),
    Name(String),
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireRecordType::deserialize(deserializer)? {
            WireRecordType::Code(code) => Ok(Self::from_code(code)),
            WireRecordType::Name(name) => Self::from_name(&name)
                .ok_or_else(|| D::Error::custom(format!("unknown record type: {name}"))),
        }
    }
}
