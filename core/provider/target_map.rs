use super::SourceToTargetProvider;
use crate::model::{Project, TargetInfo, WorkspacePath};
use crate::resolver::LookupError;
use async_trait::async_trait;
use tracing::*;

/// Answers from the target map of the last project sync. Declines for projects that were never
/// synced, and for files the target map doesn't know about.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct TargetMapProvider;

#[async_trait]
impl SourceToTargetProvider for TargetMapProvider {
    fn name(&self) -> &str {
        "target-map"
    }

    #[tracing::instrument(name = "TargetMapProvider::lookup", skip(self, project))]
    async fn targets_building_source_file(
        &self,
        project: &Project,
        source: &WorkspacePath,
    ) -> Result<Option<Vec<TargetInfo>>, LookupError> {
        let Some(data) = project.data() else {
            trace!("Project {} has not been synced", project.name());
            return Ok(None);
        };

        let targets: Vec<TargetInfo> = data
            .targets_building(source)
            .into_iter()
            .map(TargetInfo::from)
            .collect();

        if targets.is_empty() {
            Ok(None)
        } else {
            Ok(Some(targets))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildInfo, ProjectData, TargetIdeInfo};

    fn target(label: &str, kind: &str, sources: &[&str]) -> TargetIdeInfo {
        TargetIdeInfo {
            label: label.parse().unwrap(),
            kind: kind.to_string(),
            sources: sources
                .iter()
                .map(|s| WorkspacePath::new(*s).unwrap())
                .collect(),
        }
    }

    fn synced_project() -> Project {
        let data = ProjectData::new(
            BuildInfo::new("/out/bin"),
            vec![
                target("//app:lib", "scala_library", &["app/Lib.scala", "app/Main.scala"]),
                target("//app:MainApp", "scala_binary", &["app/Main.scala"]),
                target("//other:thing", "java_library", &["other/Thing.java"]),
            ],
        );
        Project::new("test", "/workspace").with_data(data)
    }

    #[tokio::test]
    async fn declines_for_unsynced_projects() {
        let project = Project::new("test", "/workspace");
        let source = WorkspacePath::new("app/Main.scala").unwrap();
        let result = TargetMapProvider
            .targets_building_source_file(&project, &source)
            .await;
        assert_matches!(result, Ok(None));
    }

    #[tokio::test]
    async fn declines_for_unknown_files() {
        let source = WorkspacePath::new("app/Unknown.scala").unwrap();
        let result = TargetMapProvider
            .targets_building_source_file(&synced_project(), &source)
            .await;
        assert_matches!(result, Ok(None));
    }

    #[tokio::test]
    async fn returns_every_target_building_the_file_in_order() {
        let source = WorkspacePath::new("app/Main.scala").unwrap();
        let targets = TargetMapProvider
            .targets_building_source_file(&synced_project(), &source)
            .await
            .unwrap()
            .unwrap();

        let found: Vec<(String, Option<&str>)> = targets
            .iter()
            .map(|t| (t.label().to_string(), t.kind()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("//app:lib".to_string(), Some("scala_library")),
                ("//app:MainApp".to_string(), Some("scala_binary")),
            ]
        );
    }
}
