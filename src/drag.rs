use crate::model::{DragResult, ZoneRef};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: ZoneRef,
    },
}

/// Tracks a single lifted task between gesture start and gesture end.
#[derive(Debug, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn lifted(&self) -> Option<&ZoneRef> {
        match &self.state {
            DragState::Dragging { source } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Lifting while already dragging replaces the earlier source.
    pub fn begin(&mut self, source: ZoneRef) {
        log::debug!("lifted task {} from {}", source.index, source.zone_id);
        self.state = DragState::Dragging { source };
    }

    pub fn end(&mut self, destination: Option<ZoneRef>) -> Option<DragResult> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { source } => Some(DragResult {
                source,
                destination,
            }),
            DragState::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_then_end_yields_result_and_returns_to_idle() {
        let mut drag = DragCoordinator::new();
        assert!(!drag.is_dragging());
        drag.begin(ZoneRef::new("eventsMon Apr 01 2024", 2));
        assert!(drag.is_dragging());
        assert_eq!(drag.lifted().map(|z| z.index), Some(2));

        let result = drag
            .end(Some(ZoneRef::new("eventsTue Apr 02 2024", 0)))
            .unwrap();
        assert_eq!(result.source.zone_id, "eventsMon Apr 01 2024");
        assert_eq!(result.destination.unwrap().zone_id, "eventsTue Apr 02 2024");
        assert_eq!(drag.state, DragState::Idle);
    }

    #[test]
    fn end_without_drag_is_none() {
        let mut drag = DragCoordinator::new();
        assert_eq!(drag.end(None), None);
    }

    #[test]
    fn end_without_destination_keeps_source() {
        let mut drag = DragCoordinator::new();
        drag.begin(ZoneRef::new("a", 0));
        let result = drag.end(None).unwrap();
        assert_eq!(result.destination, None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn cancel_discards_lifted_task() {
        let mut drag = DragCoordinator::new();
        drag.begin(ZoneRef::new("a", 0));
        drag.cancel();
        assert_eq!(drag.end(Some(ZoneRef::new("b", 0))), None);
    }
}
