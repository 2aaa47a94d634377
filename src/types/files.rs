use super::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A file reference: either a link to somewhere else or a file hosted by
/// the service behind a signed, expiring URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    External { external: ExternalFile },
    File { file: HostedFile },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    pub expiry_time: Timestamp,
}

impl FileObject {
    pub fn external(url: impl Into<String>) -> Self {
        FileObject::External {
            external: ExternalFile { url: url.into() },
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FileObject::External { external } => &external.url,
            FileObject::File { file } => &file.url,
        }
    }

    /// External files reduce to their URL, hosted files keep the expiry.
    pub fn reduce(&self) -> Value {
        match self {
            FileObject::External { external } => Value::String(external.url.clone()),
            FileObject::File { file } => json!({
                "url": file.url,
                "expiry_time": file.expiry_time.to_rfc3339(),
            }),
        }
    }
}

/// An entry of a `files` property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFile {
    pub name: String,
    #[serde(flatten)]
    pub file: FileObject,
}

/// Page and callout icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: ExternalFile },
    File { file: HostedFile },
}

impl Icon {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        Icon::Emoji {
            emoji: emoji.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_named_files() {
        let wire = json!([
            {
                "name": "p8logo.png",
                "type": "file",
                "file": {
                    "url": "https://s3.us-west-2.amazonaws.com/p8logo.png",
                    "expiry_time": "2021-10-25T18:39:28.188Z"
                }
            },
            {
                "name": "potw2142a.jpg",
                "type": "external",
                "external": { "url": "https://www.nasa.gov/potw2142a.jpg" }
            }
        ]);
        let files: Vec<NamedFile> = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(files[1].file.url(), "https://www.nasa.gov/potw2142a.jpg");
        assert_eq!(serde_json::to_value(&files).unwrap(), wire);

        assert_eq!(
            files[0].file.reduce(),
            json!({
                "url": "https://s3.us-west-2.amazonaws.com/p8logo.png",
                "expiry_time": "2021-10-25T18:39:28.188Z"
            })
        );
        assert_eq!(files[1].file.reduce(), json!("https://www.nasa.gov/potw2142a.jpg"));
    }

    #[test]
    fn test_icon_variants() {
        let icon: Icon = serde_json::from_value(json!({"type": "emoji", "emoji": "🤪"})).unwrap();
        assert_eq!(icon, Icon::emoji("🤪"));

        let err = serde_json::from_value::<Icon>(json!({"type": "custom_emoji"})).unwrap_err();
        assert!(err.to_string().contains("unknown variant `custom_emoji`"));
    }
}
