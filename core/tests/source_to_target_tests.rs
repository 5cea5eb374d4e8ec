use assert_fs::prelude::*;
use blazelink_core::run::{
    ApplicationConfiguration, ConfigurationContext, DeployableJarRunConfigurationProducer,
    MainObject, RunConfigurationProducer,
};
use blazelink_core::workspace::open_project;
use blazelink_core::{Config, SourceToTargetMap, WorkspacePath};

const PROJECT_DATA: &str = r#"
{
  "build_info": { "bin_dir": "/out/bin" },
  "targets": [
    {
      "label": "//app:lib",
      "kind": "scala_library",
      "sources": ["app/Lib.scala"]
    },
    {
      "label": "//app:MainApp",
      "kind": "scala_binary",
      "sources": ["app/Main.scala"]
    }
  ]
}
"#;

fn workspace() -> assert_fs::TempDir {
    let root = assert_fs::TempDir::new().unwrap();
    root.child("MODULE.bazel").touch().unwrap();
    root.child("project.json").write_str(PROJECT_DATA).unwrap();
    root.child("app").create_dir_all().unwrap();
    root
}

#[tokio::test]
async fn synced_projects_answer_from_their_target_map() {
    let root = workspace();
    let config = Config::builder()
        .invocation_dir(root.child("app").path().to_path_buf())
        .project_data_path(root.child("project.json").path())
        .build_tool(root.path().join("not-installed"))
        .build()
        .unwrap();

    let project = open_project(&config).await.unwrap();
    let map = SourceToTargetMap::with_default_providers(&config);
    let source = WorkspacePath::new("app/Main.scala").unwrap();

    let targets = map
        .find_targets_building_source_file(&project, &source)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].label().to_string(), "//app:MainApp");
    assert_eq!(targets[0].kind(), Some("scala_binary"));
}

#[tokio::test]
async fn nothing_is_found_when_no_provider_can_answer() {
    let root = workspace();
    let config = Config::builder()
        .workspace_root(root.path())
        .build_tool(root.path().join("not-installed"))
        .build()
        .unwrap();

    let project = open_project(&config).await.unwrap();
    let map = SourceToTargetMap::with_default_providers(&config);
    let source = WorkspacePath::new("app/Main.scala").unwrap();

    let result = map
        .find_targets_building_source_file(&project, &source)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[cfg(unix)]
#[tokio::test]
async fn files_missing_from_the_target_map_are_queried() {
    use std::os::unix::fs::PermissionsExt;

    let root = workspace();
    let tool = root.child("fake-bazel");
    tool.write_str("#!/bin/sh\necho \"scala_library rule //app:fresh\"\n")
        .unwrap();
    std::fs::set_permissions(tool.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

    let config = Config::builder()
        .workspace_root(root.path())
        .project_data_path(root.child("project.json").path())
        .build_tool(tool.path())
        .build()
        .unwrap();

    let project = open_project(&config).await.unwrap();
    let map = SourceToTargetMap::with_default_providers(&config);
    let source = WorkspacePath::new("app/Fresh.scala").unwrap();

    let targets = map
        .find_targets_building_source_file(&project, &source)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(targets[0].label().to_string(), "//app:fresh");
}

#[cfg(unix)]
#[tokio::test]
async fn an_empty_query_result_is_not_an_answer() {
    use std::os::unix::fs::PermissionsExt;

    let root = workspace();
    let tool = root.child("fake-bazel");
    tool.write_str("#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(tool.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

    let config = Config::builder()
        .workspace_root(root.path())
        .project_data_path(root.child("project.json").path())
        .build_tool(tool.path())
        .build()
        .unwrap();

    let project = open_project(&config).await.unwrap();
    let map = SourceToTargetMap::with_default_providers(&config);
    let source = WorkspacePath::new("app/Unknown.scala").unwrap();

    let result = map
        .find_targets_building_source_file(&project, &source)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn main_objects_run_out_of_their_binary_deploy_jar() {
    let root = workspace();
    let config = Config::builder()
        .workspace_root(root.path())
        .project_data_path(root.child("project.json").path())
        .build()
        .unwrap();

    let project = open_project(&config).await.unwrap();
    let context = ConfigurationContext::new(project).with_main_object(MainObject::new(
        "Main",
        "com.example.Main$",
        Some(WorkspacePath::new("app/Main.scala").unwrap()),
    ));

    let producer = DeployableJarRunConfigurationProducer::new();
    let mut configuration = ApplicationConfiguration::default();
    assert!(producer.setup_configuration_from_context(&mut configuration, &context));
    assert!(producer.is_configuration_from_context(&configuration, &context));

    let json = serde_json::to_value(&configuration).unwrap();
    assert_eq!(json["vm_parameters"], "-cp /out/bin/MainApp_deploy.jar");
    assert_eq!(json["target_label"], "//app:MainApp");
    assert_eq!(json["before_run_tasks"][0], "generate_deployable_jar");
}
