//! `uses` がレジストリへ委譲することのUnit Test

use std::cell::RefCell;
use std::sync::Arc;

use archmodel::element::RELATIONSHIP_TAG;
use archmodel::{
    Container, ContainerInstance, Element, InteractionStyle, ModelResult, Relationship,
    RelationshipRegistry, SoftwareSystem, Tags,
};

#[derive(Debug, Clone, PartialEq)]
struct RecordedCall {
    source_id: String,
    destination_id: String,
    description: String,
    technology: String,
    interaction_style: Option<InteractionStyle>,
}

/// 呼び出しを記録するだけのレジストリ
#[derive(Default)]
struct RecordingRegistry {
    calls: RefCell<Vec<RecordedCall>>,
}

impl RelationshipRegistry for RecordingRegistry {
    fn create_relationship(
        &self,
        source: &dyn Element,
        destination: &dyn Element,
        description: &str,
        technology: &str,
        interaction_style: Option<InteractionStyle>,
    ) -> ModelResult<Relationship> {
        self.calls.borrow_mut().push(RecordedCall {
            source_id: source.id().to_string(),
            destination_id: destination.id().to_string(),
            description: description.to_string(),
            technology: technology.to_string(),
            interaction_style,
        });
        Ok(Relationship {
            id: "1".to_string(),
            source_id: source.id().to_string(),
            destination_id: destination.id().to_string(),
            description: description.to_string(),
            technology: technology.to_string(),
            interaction_style,
            tags: [RELATIONSHIP_TAG].into_iter().collect::<Tags>(),
        })
    }
}

fn instances() -> (ContainerInstance, ContainerInstance) {
    let system = SoftwareSystem::new("System", "");
    let api = Arc::new(Container::new(&system, "API", "", "Rust"));
    (
        ContainerInstance::new(api.clone(), 1),
        ContainerInstance::new(api, 2),
    )
}

#[test]
fn test_uses_delegates_exactly_once() {
    let registry = RecordingRegistry::default();
    let (a, b) = instances();

    let relationship = a.uses(&registry, Some(&b), "desc", "tech").unwrap();

    let calls = registry.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        RecordedCall {
            source_id: a.id().to_string(),
            destination_id: b.id().to_string(),
            description: "desc".to_string(),
            technology: "tech".to_string(),
            interaction_style: None,
        }
    );
    assert_eq!(relationship.destination_id, b.id());
}

#[test]
fn test_uses_without_destination_does_not_delegate() {
    let registry = RecordingRegistry::default();
    let (a, _) = instances();

    let err = a.uses(&registry, None, "desc", "tech").unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(registry.calls.borrow().is_empty());
}

#[test]
fn test_uses_passes_empty_description_through() {
    let registry = RecordingRegistry::default();
    let (a, b) = instances();

    a.uses_with_style(&registry, Some(&b), "", "", InteractionStyle::Asynchronous)
        .unwrap();

    let calls = registry.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].description, "");
    assert_eq!(calls[0].technology, "");
    assert_eq!(calls[0].interaction_style, Some(InteractionStyle::Asynchronous));
}
