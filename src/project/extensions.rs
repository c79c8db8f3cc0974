//! Extension objects that plugins attach to a module

/// Settings shared by the Android library and application extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagingExtension {
    pub namespace: Option<String>,
}

impl PackagingExtension {
    pub fn has_namespace(&self) -> bool {
        self.namespace.as_deref().is_some_and(|ns| !ns.is_empty())
    }
}

/// The closed set of Android extension shapes the patcher understands.
/// `Other` stands for any extension registered under `android` that is
/// neither a library nor an application extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AndroidExtension {
    Library(PackagingExtension),
    Application(PackagingExtension),
    Other(String),
}

impl AndroidExtension {
    pub fn packaging(&self) -> Option<&PackagingExtension> {
        match self {
            AndroidExtension::Library(ext) | AndroidExtension::Application(ext) => Some(ext),
            AndroidExtension::Other(_) => None,
        }
    }

    pub fn packaging_mut(&mut self) -> Option<&mut PackagingExtension> {
        match self {
            AndroidExtension::Library(ext) | AndroidExtension::Application(ext) => Some(ext),
            AndroidExtension::Other(_) => None,
        }
    }

    pub fn is_library(&self) -> bool {
        matches!(self, AndroidExtension::Library(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KotlinOptions {
    pub jvm_target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionContainer {
    pub android: Option<AndroidExtension>,
    pub kotlin: Option<KotlinOptions>,
}

impl ExtensionContainer {
    pub fn packaging(&self) -> Option<&PackagingExtension> {
        self.android.as_ref().and_then(AndroidExtension::packaging)
    }

    pub fn packaging_mut(&mut self) -> Option<&mut PackagingExtension> {
        self.android.as_mut().and_then(AndroidExtension::packaging_mut)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.packaging().and_then(|p| p.namespace.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_namespace_counts_as_unset() {
        let mut ext = PackagingExtension::default();
        assert!(!ext.has_namespace());

        ext.namespace = Some(String::new());
        assert!(!ext.has_namespace());

        ext.namespace = Some("com.example".to_string());
        assert!(ext.has_namespace());
    }

    #[test]
    fn test_other_extension_has_no_packaging() {
        let mut container = ExtensionContainer {
            android: Some(AndroidExtension::Other("TestExtension".to_string())),
            kotlin: None,
        };
        assert!(container.packaging().is_none());
        assert!(container.packaging_mut().is_none());
        assert!(container.namespace().is_none());
    }

    #[test]
    fn test_application_exposes_packaging() {
        let ext = AndroidExtension::Application(PackagingExtension {
            namespace: Some("com.example.app".to_string()),
        });
        assert!(!ext.is_library());
        assert_eq!(
            ext.packaging().and_then(|p| p.namespace.as_deref()),
            Some("com.example.app")
        );
    }
}
