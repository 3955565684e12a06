use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Mission, announcement, and access-role attributes for a project.
/// Shares its `uid` with the corresponding [`super::ProjectBase`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub uid: Uuid,
    #[serde(default)]
    pub mission_statement: String,
    #[serde(default)]
    pub announcement_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_user_descriptors")]
    pub writers: Vec<UserDescriptor>,
    #[serde(default, deserialize_with = "deserialize_user_descriptors")]
    pub auditors: Vec<UserDescriptor>,
    #[serde(default, deserialize_with = "deserialize_user_descriptors")]
    pub meeting_coordinators: Vec<UserDescriptor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar: String,
}

impl UserDescriptor {
    fn from_bare_username(username: String) -> Self {
        Self {
            name: username.clone(),
            email: String::new(),
            username,
            avatar: String::new(),
        }
    }
}

impl ProjectSettings {
    /// Settings for a project that has a base record but no settings
    /// written yet (I2's "base may exist without settings briefly
    /// during create").
    pub fn empty(uid: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            uid,
            mission_statement: String::new(),
            announcement_date: None,
            writers: Vec::new(),
            auditors: Vec::new(),
            meeting_coordinators: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Decodes either the current `{name, email, username, avatar}` record
/// form or the older plain-string form (one writer generation records
/// `writers`/`auditors`/`meeting_coordinators` as `Vec<String>`). A bare
/// string `s` is promoted to `{username: s, name: s, email: "", avatar: ""}`,
/// per the tolerant-decode rule in spec.md §9.
fn deserialize_user_descriptors<'de, D>(deserializer: D) -> Result<Vec<UserDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UserDescriptorSeqVisitor;

    impl<'de> Visitor<'de> for UserDescriptorSeqVisitor {
        type Value = Vec<UserDescriptor>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a sequence of user descriptors or bare usernames")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            #[derive(Deserialize)]
            #[serde(untagged)]
            enum Entry {
                Bare(String),
                Full(UserDescriptor),
            }

            let mut out = Vec::new();
            while let Some(entry) = seq.next_element::<Entry>()? {
                out.push(match entry {
                    Entry::Bare(s) => UserDescriptor::from_bare_username(s),
                    Entry::Full(d) => d,
                });
            }
            Ok(out)
        }
    }

    deserializer.deserialize_seq(UserDescriptorSeqVisitor)
}
