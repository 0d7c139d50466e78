use crate::annotate::model::Annotation;

/// The visible annotation list plus the stack of undone annotations. An
/// annotation lives in exactly one of the two at a time. Undo is pure LIFO
/// on the list's tail; there is no redo, and committing a new annotation
/// does not clear the undone stack.
#[derive(Debug, Default)]
pub struct EditHistory {
    annotations: Vec<Annotation>,
    undone: Vec<Annotation>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut [Annotation] {
        &mut self.annotations
    }

    pub fn undone_count(&self) -> usize {
        self.undone.len()
    }

    pub fn commit(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Move the most recent annotation onto the undone stack. Returns false
    /// when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.annotations.pop() {
            Some(annotation) => {
                self.undone.push(annotation);
                true
            }
            None => false,
        }
    }

    /// Drop everything, both visible and undone. Used when a new capture
    /// replaces the working image.
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.undone.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::EditHistory;
    use crate::annotate::model::{Annotation, AnnotationKind, ToolKind, ToolSettings};

    fn labelled(text: &str) -> Annotation {
        let mut annotation = Annotation::new(ToolKind::Text, &ToolSettings::default());
        annotation.kind = AnnotationKind::Text(text.to_string());
        annotation
    }

    fn labels(history: &EditHistory) -> Vec<String> {
        history
            .annotations()
            .iter()
            .map(|annotation| match &annotation.kind {
                AnnotationKind::Text(text) => text.clone(),
                _ => panic!("expected text"),
            })
            .collect()
    }

    #[test]
    fn undo_is_strictly_lifo() {
        let mut history = EditHistory::new();
        history.commit(labelled("A"));
        history.commit(labelled("B"));
        history.commit(labelled("C"));

        assert!(history.undo());
        assert_eq!(labels(&history), ["A", "B"]);
        assert_eq!(history.undone_count(), 1);

        assert!(history.undo());
        assert_eq!(labels(&history), ["A"]);
        assert_eq!(history.undone_count(), 2);
    }

    #[test]
    fn undo_on_empty_list_reports_nothing_to_do() {
        let mut history = EditHistory::new();
        assert!(!history.undo());
    }

    #[test]
    fn committing_after_undo_keeps_the_undone_stack() {
        let mut history = EditHistory::new();
        history.commit(labelled("A"));
        history.undo();
        history.commit(labelled("B"));
        assert_eq!(history.undone_count(), 1);
        assert_eq!(labels(&history), ["B"]);
    }

    #[test]
    fn clear_drops_both_sides() {
        let mut history = EditHistory::new();
        history.commit(labelled("A"));
        history.commit(labelled("B"));
        history.undo();
        history.clear();
        assert!(history.annotations().is_empty());
        assert_eq!(history.undone_count(), 0);
        assert!(!history.undo());
    }
}
