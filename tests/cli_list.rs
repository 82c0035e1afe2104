mod common;

use common::TestEnv;

const RECORD: &str = r#"{
  "project_path": "/code/App/App.csproj",
  "profile": "dev",
  "region": "us-east-1",
  "application": {
    "name": "shop",
    "recipe_id": "AspNetAppEcsFargate",
    "recipe_version": "1.0.0"
  },
  "option_values": { "DesiredCount": 2 },
  "status": "succeeded",
  "output_dir": null,
  "updated_at": "2026-03-01T09:30:00Z"
}"#;

#[test]
fn test_list_empty_store() {
    let env = TestEnv::new();

    let result = env.run_raw(&["list"], &[]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    assert!(result.stdout.contains("No deployments recorded."));
}

#[test]
fn test_list_reads_records_from_home() {
    let env = TestEnv::new();
    env.write_home(".stackwright/deployments/0123abcd.json", RECORD);

    let result = env.run_raw(&["list"], &[]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    assert!(result.stdout.contains("shop  AspNetAppEcsFargate 1.0.0  succeeded"));
    assert!(result.stdout.contains("/code/App/App.csproj"));
}

#[test]
fn test_list_json() {
    let env = TestEnv::new();
    env.write_home(".stackwright/deployments/0123abcd.json", RECORD);

    let result = env.run_raw(&["--json", "list"], &[]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    let json = result.json();
    assert_eq!(json["deployments"][0]["application"], "shop");
    assert_eq!(json["deployments"][0]["profile"], "dev");
}
