// file: src/notebook/callout.rs
// description: styled blocks that replace exercise, hint and solution cells
// reference: https://docs.rs/minijinja

use crate::error::{PressError, Result};
use crate::notebook::markers::{CellKind, MarkedCell};
use lazy_static::lazy_static;
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};

const EXERCISE_TEMPLATE: &str = r#"
---
<h3 style="background: #256ca2; color: #e9e9e9">&#129504 {{ title }}</h3>

{{ content }}

"#;

// The padded line after the content is part of the published block.
const HINT_TEMPLATE: &str = concat!(
    "\n---\n",
    "<details><summary style=\"background: #d6c89d; color: #e9e9e9\">&#128269 {{ title }}</summary>\n",
    "\n",
    "{{ content }}\n",
    "                         \n",
    "</details>\n",
    "\n",
    "---\n",
);

const SOLUTION_TEMPLATE: &str = r#"
---
<details><summary style='background: #22ae6a; color:#e9e9e9'>&#128273 {{ title }}</summary>

{{ content }}

</details>

---
"#;

lazy_static! {
    static ref CALLOUTS: Environment<'static> = {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template("exercise", EXERCISE_TEMPLATE)
            .expect("exercise template is valid");
        env.add_template("hint", HINT_TEMPLATE)
            .expect("hint template is valid");
        env.add_template("solution", SOLUTION_TEMPLATE)
            .expect("solution template is valid");
        env
    };
}

fn template_name(kind: CellKind) -> Option<&'static str> {
    match kind {
        CellKind::Exercise => Some("exercise"),
        CellKind::Hint => Some("hint"),
        CellKind::Solution => Some("solution"),
        CellKind::Plain => None,
    }
}

/// Renders the block for a marked cell. Hint and Solution become
/// collapsible `<details>` elements, Exercise a plain heading.
pub fn render_callout(cell: &MarkedCell<'_>) -> Result<String> {
    let name = template_name(cell.kind).ok_or_else(|| {
        PressError::Validation("plain cells have no callout template".to_string())
    })?;

    CALLOUTS
        .get_template(name)
        .and_then(|template| template.render(context! { title => cell.title, content => &cell.body }))
        .map_err(|e| PressError::template(name, &e))
}
