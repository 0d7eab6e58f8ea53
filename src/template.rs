//! Starting templates.

use uuid::Uuid;

use crate::element::{
    Element, ElementDraft, ElementKind, FontStyle, FontWeight, Rect, ShapeProps, TextAlign, TextDecoration, TextProps,
};

/// The default business card: white background, accent bar, contact lines, and a logo circle.
#[must_use]
pub fn business_card() -> Vec<Element> {
    let drafts = vec![
        ElementDraft::new("Background", Rect::new(0.0, 0.0, 600.0, 350.0), flat_rect("#ffffff")),
        ElementDraft::new("Accent Bar", Rect::new(0.0, 0.0, 600.0, 8.0), flat_rect("#3B82F6")),
        text("Name", Rect::new(40.0, 60.0, 300.0, 40.0), "John Doe", 28.0, FontWeight::Bold, 1.2, "#1a1a1a"),
        text(
            "Title",
            Rect::new(40.0, 100.0, 300.0, 24.0),
            "Senior Product Designer",
            16.0,
            FontWeight::Normal,
            1.4,
            "#6b7280",
        ),
        text(
            "Email",
            Rect::new(40.0, 200.0, 250.0, 20.0),
            "john.doe@company.com",
            14.0,
            FontWeight::Normal,
            1.4,
            "#374151",
        ),
        text(
            "Phone",
            Rect::new(40.0, 225.0, 200.0, 20.0),
            "+1 (555) 123-4567",
            14.0,
            FontWeight::Normal,
            1.4,
            "#374151",
        ),
        text(
            "Website",
            Rect::new(40.0, 250.0, 200.0, 20.0),
            "www.company.com",
            14.0,
            FontWeight::Normal,
            1.4,
            "#3B82F6",
        ),
        ElementDraft::new(
            "Logo Circle",
            Rect::new(460.0, 120.0, 100.0, 100.0),
            ElementKind::Circle(ShapeProps {
                fill: "#EFF6FF".into(),
                stroke: "#3B82F6".into(),
                stroke_width: 2.0,
                corner_radius: 50.0,
            }),
        ),
    ];
    drafts.into_iter().map(|d| d.into_element(Uuid::new_v4())).collect()
}

fn flat_rect(fill: &str) -> ElementKind {
    ElementKind::Rectangle(ShapeProps {
        fill: fill.into(),
        stroke: "transparent".into(),
        stroke_width: 0.0,
        corner_radius: 0.0,
    })
}

fn text(
    name: &str,
    bounds: Rect,
    content: &str,
    font_size: f64,
    font_weight: FontWeight,
    line_height: f64,
    color: &str,
) -> ElementDraft {
    ElementDraft::new(
        name,
        bounds,
        ElementKind::Text(TextProps {
            content: content.into(),
            font_family: "Inter".into(),
            font_size,
            font_weight,
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::None,
            text_align: TextAlign::Left,
            line_height,
            color: color.into(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;

    #[test]
    fn business_card_has_background_at_bottom() {
        let elements = business_card();
        assert_eq!(elements.len(), 8);
        assert_eq!(elements[0].base.name, "Background");
        assert_eq!(elements[0].bounds(), Rect::new(0.0, 0.0, 600.0, 350.0));
    }

    #[test]
    fn business_card_ids_are_unique() {
        let elements = business_card();
        let mut ids: Vec<_> = elements.iter().map(Element::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), elements.len());
    }

    #[test]
    fn business_card_logo_is_circle_on_top() {
        let elements = business_card();
        let last = elements.last().map(Element::element_type);
        assert_eq!(last, Some(ElementType::Circle));
    }
}
