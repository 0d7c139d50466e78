use crate::annotate::model::Annotation;
use crate::annotate::render::render_annotation;
use crate::annotate::text::TextShaper;
use crate::capture::surface::PixelSurface;

/// Merge the base image with every committed annotation in list order, then
/// the in-progress one last so a live preview always sits on top.
pub fn flatten(
    base: &PixelSurface,
    annotations: &mut [Annotation],
    in_progress: Option<&mut Annotation>,
    shaper: &dyn TextShaper,
) -> PixelSurface {
    let mut out = PixelSurface::new(base.width(), base.height(), base.order());
    out.blit(base, 0, 0);
    for annotation in annotations.iter_mut() {
        render_annotation(&mut out, annotation, shaper);
    }
    if let Some(annotation) = in_progress {
        render_annotation(&mut out, annotation, shaper);
    }
    out
}
