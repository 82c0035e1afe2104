//! Built-in type hint handlers
//!
//! | hint | behavior | resource |
//! |---|---|---|
//! | `ECSCluster` | choose or create | ECS cluster |
//! | `BeanstalkApplication` | choose or create | Elastic Beanstalk application |
//! | `IAMRole` | choose or create | IAM role |
//! | `Vpc` | select existing | VPC |
//! | `EC2KeyPair` | select existing | EC2 key pair |

mod choose_or_create;
mod select_existing;

use std::sync::Arc;

pub use choose_or_create::ChooseOrCreateHint;
pub use select_existing::SelectExistingHint;

use crate::domain::ports::{ResourceKind, ResourcePicker, ResourceQueryService, TypeHintRegistry};

/// Registry with every built-in handler wired to `query` and `picker`
pub fn default_type_hints(
    query: Arc<dyn ResourceQueryService>,
    picker: Arc<dyn ResourcePicker>,
) -> TypeHintRegistry {
    let choose = |kind| -> Arc<ChooseOrCreateHint> {
        Arc::new(ChooseOrCreateHint::new(kind, query.clone(), picker.clone()))
    };
    let select = |kind| -> Arc<SelectExistingHint> {
        Arc::new(SelectExistingHint::new(kind, query.clone(), picker.clone()))
    };

    TypeHintRegistry::new()
        .with("ECSCluster", choose(ResourceKind::EcsCluster))
        .with("BeanstalkApplication", choose(ResourceKind::BeanstalkApplication))
        .with("IAMRole", choose(ResourceKind::IamRole))
        .with("Vpc", select(ResourceKind::Vpc))
        .with("EC2KeyPair", select(ResourceKind::Ec2KeyPair))
}

#[cfg(test)]
mod tests;
