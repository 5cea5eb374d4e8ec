use crate::model::{Project, WorkspacePath};

/// A Scala `object` with a `main` method.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainObject {
    name: String,
    qualified_name: String,
    source: Option<WorkspacePath>,
}

impl MainObject {
    pub fn new<N, Q>(name: N, qualified_name: Q, source: Option<WorkspacePath>) -> Self
    where
        N: Into<String>,
        Q: Into<String>,
    {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            source,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn qualified_name(&self) -> &str {
        self.qualified_name.as_ref()
    }

    /// The qualified name without the trailing `$` of the object's class, which is the name the
    /// JVM launcher expects as main class.
    ///
    pub fn truncated_qualified_name(&self) -> &str {
        self.qualified_name
            .strip_suffix('$')
            .unwrap_or(&self.qualified_name)
    }

    /// The file the object is defined in, if it lives in a file at all.
    pub fn source(&self) -> Option<&WorkspacePath> {
        self.source.as_ref()
    }
}

/// Where a run configuration is being created from: the project, the module the cursor is in,
/// and the main object found at the cursor, if any.
///
#[derive(Debug, Clone)]
pub struct ConfigurationContext {
    pub project: Project,
    pub module: Option<String>,
    pub main_object: Option<MainObject>,
}

impl ConfigurationContext {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            module: None,
            main_object: None,
        }
    }

    pub fn with_module<S>(mut self, module: S) -> Self
    where
        S: Into<String>,
    {
        self.module = Some(module.into());
        self
    }

    pub fn with_main_object(mut self, main_object: MainObject) -> Self {
        self.main_object = Some(main_object);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_the_object_class_suffix() {
        let main = MainObject::new("Main", "com.example.Main$", None);
        assert_eq!(main.truncated_qualified_name(), "com.example.Main");
    }

    #[test]
    fn leaves_plain_class_names_alone() {
        let main = MainObject::new("Main", "com.example.Main", None);
        assert_eq!(main.truncated_qualified_name(), "com.example.Main");
    }
}
