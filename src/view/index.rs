use maud::{Markup, html};

pub const DEFAULT_INDEX_TITLE: &str = "Score Card";

#[must_use]
pub fn render_index_template(title: &str) -> Markup {
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            link rel="stylesheet" href="static/styles.css";
            title { (title) }
        }
        body {
            div class="hero" {
                h1 class="title" { (title) }
                p class="subtitle" { "Upload & Register" }
                button id="upload-btn" class="cta" { "Camera / Upload Scorecard" }
            }
        }
    }
}
