//! HTML templates for the web UI

use axum::response::Html;
use tera::{Context, Tera};

use crate::error::ApiError;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("add_task.html", include_str!("../templates/add_task.html")),
    ("task_list.html", include_str!("../templates/task_list.html")),
    ("report.html", include_str!("../templates/report.html")),
    ("time_view.html", include_str!("../templates/time_view.html")),
];

/// Register the embedded templates
pub fn load() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())?;
    Ok(tera)
}

pub fn render(tera: &Tera, name: &str, context: &Context) -> Result<Html<String>, ApiError> {
    Ok(Html(tera.render(name, context)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_parse() {
        let tera = load().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        for (name, _) in TEMPLATES {
            assert!(names.contains(name), "missing template {}", name);
        }
    }

    #[test]
    fn test_task_titles_are_escaped() {
        let tera = load().unwrap();
        let mut context = Context::new();
        context.insert(
            "tasks",
            &vec![serde_json::json!({
                "id": 1,
                "title": "<script>alert(1)</script>",
                "description": "",
                "completed": false
            })],
        );

        let html = render(&tera, "task_list.html", &context).unwrap().0;
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }
}
