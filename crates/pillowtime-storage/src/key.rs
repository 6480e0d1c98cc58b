use pillowtime_config::{ObjectNaming, StorageConfig};

/// Chooses the object key for each upload
#[derive(Debug, Clone)]
pub struct ObjectKeys {
    naming: ObjectNaming,
    object_name: String,
}

impl ObjectKeys {
    pub const fn new(naming: ObjectNaming, object_name: String) -> Self {
        Self { naming, object_name }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.naming, config.object_name.clone())
    }

    /// Key for the next upload
    ///
    /// With fixed naming every call returns the configured name, so
    /// concurrent uploads race and the last one wins. With unique naming a
    /// random suffix is inserted before the extension.
    pub fn next_key(&self) -> String {
        match self.naming {
            ObjectNaming::Fixed => self.object_name.clone(),
            ObjectNaming::Unique => {
                let suffix = uuid::Uuid::new_v4().simple();
                let file_start = self.object_name.rfind('/').map_or(0, |i| i + 1);

                match self.object_name[file_start..].rfind('.') {
                    Some(dot) if dot > 0 => {
                        let (stem, ext) = self.object_name.split_at(file_start + dot);
                        format!("{stem}-{suffix}{ext}")
                    }
                    _ => format!("{}-{suffix}", self.object_name),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_naming_always_returns_the_same_key() {
        let keys = ObjectKeys::new(ObjectNaming::Fixed, "test.mp3".to_owned());
        assert_eq!(keys.next_key(), "test.mp3");
        assert_eq!(keys.next_key(), "test.mp3");
    }

    #[test]
    fn unique_naming_keeps_extension() {
        let keys = ObjectKeys::new(ObjectNaming::Unique, "test.mp3".to_owned());
        let first = keys.next_key();
        let second = keys.next_key();

        assert_ne!(first, second);
        for key in [&first, &second] {
            assert!(key.starts_with("test-"), "{key}");
            assert!(key.ends_with(".mp3"), "{key}");
            assert_eq!(key.len(), "test-".len() + 32 + ".mp3".len());
        }
    }

    #[test]
    fn unique_naming_keeps_directory() {
        let keys = ObjectKeys::new(ObjectNaming::Unique, "stories.v1/night.mp3".to_owned());
        let key = keys.next_key();
        assert!(key.starts_with("stories.v1/night-"), "{key}");
        assert!(key.ends_with(".mp3"), "{key}");
    }

    #[test]
    fn unique_naming_without_extension() {
        let keys = ObjectKeys::new(ObjectNaming::Unique, "audio/story".to_owned());
        let key = keys.next_key();
        assert!(key.starts_with("audio/story-"), "{key}");
        assert_eq!(key.len(), "audio/story-".len() + 32);
    }
}
