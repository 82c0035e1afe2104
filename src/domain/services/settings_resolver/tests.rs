use super::*;
use std::sync::{Arc, Mutex};

use semver::Version;
use serde_json::json;

use crate::domain::entities::ProjectDefinition;
use crate::domain::policies::Validator;
use crate::domain::ports::{ResourceQueryError, TypeHintHandler, TypeHintResponse};
use crate::domain::value_objects::{HostCapabilities, OptionSettingValueType};

fn recipe(settings: Vec<OptionSettingItem>) -> Arc<Recipe> {
    Arc::new(Recipe {
        id: "AspNetAppEcsFargate".into(),
        version: Version::new(1, 0, 0),
        name: "ECS".into(),
        description: String::new(),
        target_service: String::new(),
        priority: 0,
        template: None,
        rules: Vec::new(),
        option_settings: settings,
        source_path: "/recipes/ecs.recipe".into(),
    })
}

fn session() -> OrchestratorSession {
    OrchestratorSession::new(
        ProjectDefinition::for_file("/code/App/App.csproj"),
        HostCapabilities::new(),
    )
    .with_application_name("web")
}

fn string(id: &str) -> OptionSettingItem {
    OptionSettingItem::new(id, OptionSettingValueType::String)
}

fn resolve(
    settings: Vec<OptionSettingItem>,
    hints: &TypeHintRegistry,
    inputs: &SettingInputs,
) -> (Recommendation, StackwrightResult<()>) {
    let session = session();
    let mut rec = Recommendation::new(recipe(settings));
    let result = SettingsResolver::new(&session, hints).resolve_all(&mut rec, inputs);
    (rec, result)
}

/// Handler answering with a fixed response and recording the pre-selection
struct ScriptedHint {
    response: Result<TypeHintResponse, fn() -> TypeHintError>,
    seen_current: Mutex<Vec<Option<Value>>>,
}

impl ScriptedHint {
    fn answering(response: TypeHintResponse) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(response),
            seen_current: Mutex::new(Vec::new()),
        })
    }

    fn failing(err: fn() -> TypeHintError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(err),
            seen_current: Mutex::new(Vec::new()),
        })
    }
}

impl TypeHintHandler for ScriptedHint {
    fn execute(&self, ctx: &TypeHintContext<'_>) -> Result<TypeHintResponse, TypeHintError> {
        self.seen_current
            .lock()
            .unwrap()
            .push(ctx.current.cloned());
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(make) => Err(make()),
        }
    }
}

#[test]
fn override_beats_prior_beats_default() {
    let settings = vec![
        string("A").with_default(json!("default-a")),
        string("B").with_default(json!("default-b")),
        string("C").with_default(json!("default-c")),
    ];
    let inputs = SettingInputs::default()
        .with_override("A", "override-a")
        .with_prior("A", json!("prior-a"))
        .with_prior("B", json!("prior-b"));

    let (rec, result) = resolve(settings, &TypeHintRegistry::new(), &inputs);
    result.unwrap();
    assert_eq!(rec.settings["A"], json!("override-a"));
    assert_eq!(rec.settings["B"], json!("prior-b"));
    assert_eq!(rec.settings["C"], json!("default-c"));
    assert!(rec.is_ready());
}

#[test]
fn prior_of_wrong_type_falls_back_to_default() {
    let settings = vec![OptionSettingItem::new("Count", OptionSettingValueType::Int)
        .with_default(json!(2))];
    let inputs = SettingInputs::default().with_prior("Count", json!("two"));

    let (rec, result) = resolve(settings, &TypeHintRegistry::new(), &inputs);
    result.unwrap();
    assert_eq!(rec.settings["Count"], json!(2));
}

#[test]
fn stack_name_placeholder_is_substituted() {
    let settings = vec![string("ServiceName").with_default(json!("{StackName}-service"))];
    let (rec, result) = resolve(settings, &TypeHintRegistry::new(), &SettingInputs::default());
    result.unwrap();
    assert_eq!(rec.settings["ServiceName"], json!("web-service"));
}

#[test]
fn dependents_resolve_after_their_dependencies() {
    let settings = vec![
        string("VpcId")
            .with_default(json!("vpc-1"))
            .depending_on("UseVpc", json!(true)),
        OptionSettingItem::new("UseVpc", OptionSettingValueType::Bool).with_default(json!(true)),
    ];
    let recipe = recipe(settings.clone());
    assert_eq!(dependency_order(&recipe).unwrap(), vec![1, 0]);

    let (rec, result) = resolve(settings, &TypeHintRegistry::new(), &SettingInputs::default());
    result.unwrap();
    assert_eq!(rec.settings["VpcId"], json!("vpc-1"));
}

#[test]
fn hidden_settings_have_no_value() {
    let settings = vec![
        OptionSettingItem::new("UseVpc", OptionSettingValueType::Bool).with_default(json!(false)),
        string("VpcId")
            .with_default(json!("vpc-1"))
            .depending_on("UseVpc", json!(true)),
    ];
    let (rec, result) = resolve(settings, &TypeHintRegistry::new(), &SettingInputs::default());
    result.unwrap();
    assert!(!rec.settings.contains_key("VpcId"));
    assert_eq!(rec.state("VpcId"), SettingState::Hidden);
    assert!(rec.is_ready());
}

#[test]
fn changing_a_dependency_refreshes_visibility() {
    let session = session();
    let hints = TypeHintRegistry::new();
    let resolver = SettingsResolver::new(&session, &hints);
    let mut rec = Recommendation::new(recipe(vec![
        OptionSettingItem::new("UseVpc", OptionSettingValueType::Bool).with_default(json!(false)),
        string("VpcId")
            .with_default(json!("vpc-1"))
            .depending_on("UseVpc", json!(true)),
    ]));
    let inputs = SettingInputs::default();
    resolver.resolve_all(&mut rec, &inputs).unwrap();
    assert!(!rec.settings.contains_key("VpcId"));

    resolver
        .set_value(&mut rec, "UseVpc", json!(true), &inputs)
        .unwrap();
    assert_eq!(rec.settings["VpcId"], json!("vpc-1"));
    assert_eq!(rec.state("VpcId"), SettingState::Resolved);

    resolver
        .set_value(&mut rec, "UseVpc", json!(false), &inputs)
        .unwrap();
    assert!(!rec.settings.contains_key("VpcId"));
    assert_eq!(rec.state("VpcId"), SettingState::Hidden);
}

#[test]
fn cycles_are_recipe_errors() {
    let recipe = recipe(vec![
        string("A").depending_on("B", json!("x")),
        string("B").depending_on("A", json!("y")),
    ]);
    let err = dependency_order(&recipe).unwrap_err();
    assert!(matches!(err, StackwrightError::InvalidRecipe { .. }));
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn unknown_dependency_is_a_recipe_error() {
    let recipe = recipe(vec![string("A").depending_on("Missing", json!(true))]);
    let err = dependency_order(&recipe).unwrap_err();
    assert!(err.to_string().contains("unknown setting 'Missing'"));
}

#[test]
fn unparsable_override_is_not_coerced() {
    let settings = vec![OptionSettingItem::new("DesiredCount", OptionSettingValueType::Int)
        .with_default(json!(1))];
    let inputs = SettingInputs::default().with_override("DesiredCount", "three");

    let (rec, result) = resolve(settings, &TypeHintRegistry::new(), &inputs);
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        StackwrightError::SettingValidationFailed { ref setting_id, .. } if setting_id == "DesiredCount"
    ));
    assert!(matches!(rec.state("DesiredCount"), SettingState::Failed(_)));
    assert!(!rec.is_ready());
}

#[test]
fn validator_failure_blocks_readiness() {
    let settings = vec![
        OptionSettingItem::new("DesiredCount", OptionSettingValueType::Int)
            .with_default(json!(0))
            .with_validator(Validator::Range {
                min: Some(1.0),
                max: Some(10.0),
            }),
        string("Later").with_default(json!("x")),
    ];
    let (rec, result) = resolve(settings, &TypeHintRegistry::new(), &SettingInputs::default());
    assert!(result.is_err());
    assert_eq!(rec.state("Later"), SettingState::Unresolved);
    assert_eq!(rec.pending().len(), 2);
}

#[test]
fn unknown_override_id_is_rejected() {
    let inputs = SettingInputs::default().with_override("Nope", "1");
    let (_, result) = resolve(vec![string("A")], &TypeHintRegistry::new(), &inputs);
    assert!(matches!(
        result.unwrap_err(),
        StackwrightError::UnknownSetting { ref setting_id, .. } if setting_id == "Nope"
    ));
}

#[test]
fn choose_or_create_keeps_existing_reference() {
    let selection = ResourceSelection::from_parts(false, Some("arn:cluster/foo"), Some("")).unwrap();
    let hints = TypeHintRegistry::new().with(
        "ECSCluster",
        ScriptedHint::answering(TypeHintResponse::Selection(selection)),
    );
    let settings = vec![OptionSettingItem::new("ClusterName", OptionSettingValueType::Object)
        .with_type_hint("ECSCluster")];

    let (rec, result) = resolve(settings, &hints, &SettingInputs::default());
    result.unwrap();
    assert_eq!(
        rec.settings["ClusterName"],
        json!({ "CreateNew": false, "ExistingResource": "arn:cluster/foo" })
    );
}

#[test]
fn hint_sees_prior_value_as_current() {
    let prior = json!({ "CreateNew": true, "NewName": "web-cluster" });
    let handler = ScriptedHint::answering(TypeHintResponse::Value(prior.clone()));
    let hints = TypeHintRegistry::new().with("ECSCluster", handler.clone());
    let settings = vec![OptionSettingItem::new("ClusterName", OptionSettingValueType::Object)
        .with_type_hint("ECSCluster")];
    let inputs = SettingInputs::default().with_prior("ClusterName", prior.clone());

    let (_, result) = resolve(settings, &hints, &inputs);
    result.unwrap();
    assert_eq!(*handler.seen_current.lock().unwrap(), vec![Some(prior)]);
}

#[test]
fn override_skips_the_hint() {
    let handler = ScriptedHint::failing(|| TypeHintError::Cancelled);
    let hints = TypeHintRegistry::new().with("Vpc", handler.clone());
    let settings = vec![string("VpcId").with_type_hint("Vpc")];
    let inputs = SettingInputs::default().with_override("VpcId", "vpc-9");

    let (rec, result) = resolve(settings, &hints, &inputs);
    result.unwrap();
    assert_eq!(rec.settings["VpcId"], json!("vpc-9"));
    assert!(handler.seen_current.lock().unwrap().is_empty());
}

#[test]
fn selection_naming_both_or_neither_is_rejected() {
    let hints = TypeHintRegistry::new().with(
        "ECSCluster",
        ScriptedHint::answering(TypeHintResponse::Selection(ResourceSelection::Empty)),
    );
    let settings = vec![OptionSettingItem::new("ClusterName", OptionSettingValueType::Object)
        .with_type_hint("ECSCluster")];
    let (_, result) = resolve(settings.clone(), &hints, &SettingInputs::default());
    assert!(result.unwrap_err().to_string().contains("a selection is required"));

    let allowing: Vec<_> = settings.into_iter().map(|s| s.allowing_empty()).collect();
    let (rec, result) = resolve(allowing, &hints, &SettingInputs::default());
    result.unwrap();
    assert_eq!(rec.settings["ClusterName"], Value::Null);
}

#[test]
fn query_failure_surfaces_as_resolution_failure() {
    let hints = TypeHintRegistry::new().with(
        "Vpc",
        ScriptedHint::failing(|| {
            TypeHintError::Query(ResourceQueryError::Transient("throttled".into()))
        }),
    );
    let settings = vec![string("VpcId").with_type_hint("Vpc")];
    let (rec, result) = resolve(settings, &hints, &SettingInputs::default());
    assert!(matches!(
        result.unwrap_err(),
        StackwrightError::ResourceQueryFailed { ref setting_id, ref message }
            if setting_id == "VpcId" && message == "throttled"
    ));
    assert!(matches!(rec.state("VpcId"), SettingState::Failed(_)));
}

#[test]
fn unregistered_hint_uses_default() {
    let settings = vec![string("Role")
        .with_type_hint("SomeFutureHint")
        .with_default(json!("role-a"))];
    let (rec, result) = resolve(settings, &TypeHintRegistry::new(), &SettingInputs::default());
    result.unwrap();
    assert_eq!(rec.settings["Role"], json!("role-a"));
}

#[test]
fn resolve_one_unknown_setting_is_an_error() {
    let session = session();
    let hints = TypeHintRegistry::new();
    let mut rec = Recommendation::new(recipe(vec![string("A")]));
    let err = SettingsResolver::new(&session, &hints)
        .resolve_one(&mut rec, "B", &SettingInputs::default())
        .unwrap_err();
    assert!(matches!(err, StackwrightError::UnknownSetting { .. }));
}
