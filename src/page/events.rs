use crate::domain::{FilterCriteria, ListingId};
use crate::map::MarkerHandle;
use std::collections::HashMap;

/// Identity of a clickable element on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    ListItem(ListingId),
    InfoWindowDetail(ListingId),
    Marker(MarkerHandle),
    ModalClose,
    ModalBackdrop,
}

/// What the application root does in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    LoadAll,
    Search(FilterCriteria),
    Select(ListingId),
    ShowDetail(ListingId),
    MarkerClicked(MarkerHandle),
    CloseModal,
}

/// Listener table. Rendering registers one action per element it creates
/// and unregisters them when the element goes away.
#[derive(Debug, Default)]
pub struct EventRegistry {
    listeners: HashMap<ElementId, UiAction>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any listener already attached to `element`.
    pub fn register(&mut self, element: ElementId, action: UiAction) {
        self.listeners.insert(element, action);
    }

    pub fn unregister(&mut self, element: ElementId) -> Option<UiAction> {
        self.listeners.remove(&element)
    }

    pub fn unregister_where<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&ElementId) -> bool,
    {
        self.listeners.retain(|element, _| !predicate(element));
    }

    pub fn action_for(&self, element: ElementId) -> Option<&UiAction> {
        self.listeners.get(&element)
    }

    pub fn is_registered(&self, element: ElementId) -> bool {
        self.listeners.contains_key(&element)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registering_twice_keeps_latest_action() {
        let mut events = EventRegistry::new();
        events.register(ElementId::ListItem(1), UiAction::Select(1));
        events.register(ElementId::ListItem(1), UiAction::ShowDetail(1));

        assert_eq!(events.len(), 1);
        assert_eq!(
            events.action_for(ElementId::ListItem(1)),
            Some(&UiAction::ShowDetail(1))
        );
    }

    #[test]
    fn unregister_where_only_drops_matching_elements() {
        let mut events = EventRegistry::new();
        events.register(ElementId::ListItem(1), UiAction::Select(1));
        events.register(ElementId::ListItem(2), UiAction::Select(2));
        events.register(ElementId::ModalClose, UiAction::CloseModal);

        events.unregister_where(|el| matches!(el, ElementId::ListItem(_)));

        assert_eq!(events.len(), 1);
        assert!(events.is_registered(ElementId::ModalClose));
    }
}
