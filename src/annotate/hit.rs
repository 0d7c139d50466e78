use crate::annotate::model::{Annotation, AnnotationKind};

/// Find the first text annotation, in list order, whose bounds contain the
/// point. Only text is draggable after creation, so shapes never match.
pub fn hit_test(annotations: &[Annotation], x: f32, y: f32) -> Option<usize> {
    annotations.iter().position(|annotation| {
        matches!(annotation.kind, AnnotationKind::Text(_)) && annotation.bounds.contains(x, y)
    })
}

#[cfg(test)]
mod tests {
    use super::hit_test;
    use crate::annotate::model::{Annotation, AnnotationKind, Bounds, ToolKind, ToolSettings};

    fn text_at(x1: f32, y1: f32, x2: f32, y2: f32) -> Annotation {
        let mut annotation = Annotation::new(ToolKind::Text, &ToolSettings::default());
        annotation.kind = AnnotationKind::Text("label".to_string());
        annotation.bounds = Bounds { x1, y1, x2, y2 };
        annotation
    }

    fn rect_at(x1: f32, y1: f32, x2: f32, y2: f32) -> Annotation {
        let mut annotation = Annotation::new(ToolKind::Rectangle, &ToolSettings::default());
        annotation.bounds = Bounds { x1, y1, x2, y2 };
        annotation
    }

    #[test]
    fn only_text_matches_even_when_a_shape_overlaps() {
        let list = vec![rect_at(0.0, 0.0, 100.0, 100.0), text_at(10.0, 10.0, 60.0, 30.0)];
        assert_eq!(hit_test(&list, 20.0, 20.0), Some(1));
    }

    #[test]
    fn first_matching_text_wins_in_list_order() {
        let list = vec![
            text_at(0.0, 0.0, 50.0, 50.0),
            text_at(10.0, 10.0, 60.0, 60.0),
        ];
        assert_eq!(hit_test(&list, 20.0, 20.0), Some(0));
    }

    #[test]
    fn misses_outside_all_bounds() {
        let list = vec![text_at(0.0, 0.0, 10.0, 10.0)];
        assert_eq!(hit_test(&list, 50.0, 50.0), None);
    }

    #[test]
    fn bounds_edges_are_inclusive() {
        let list = vec![text_at(10.0, 10.0, 20.0, 20.0)];
        assert_eq!(hit_test(&list, 10.0, 20.0), Some(0));
        assert_eq!(hit_test(&list, 20.0, 10.0), Some(0));
    }
}
