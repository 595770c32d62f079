// JavaScript evaluated in the page. Each builder returns a self-contained
// expression; async ones resolve to a value that `Page::evaluate` awaits.

use anyhow::Result;

use super::selectors::{Selectors, EXPAND_BUTTONS};

/// Max scroll steps before giving up on a page that keeps growing.
const MAX_SCROLL_STEPS: u32 = 40;
const SCROLL_STEP_PX: u32 = 600;
const SCROLL_DELAY_MS: u32 = 250;

/// Max rounds of expand clicks; expanding can reveal more buttons.
const MAX_EXPAND_ROUNDS: u32 = 3;

const EXTRACT_FN: &str = r#"(spec) => Array.from(document.querySelectorAll(spec.root)).map((node) => {
  const record = {};
  for (const field of spec.fields) {
    const targets = field.selector ? Array.from(node.querySelectorAll(field.selector)) : [node];
    if (field.read.kind === 'all_text') {
      record[field.name] = targets.map((el) => (el.innerText || '').trim()).filter(Boolean);
      continue;
    }
    const el = targets[0];
    if (!el) {
      record[field.name] = null;
    } else if (field.read.kind === 'attr') {
      record[field.name] = el.getAttribute(field.read.name);
    } else {
      record[field.name] = el.innerText;
    }
  }
  return record;
})"#;

/// Evaluates to an array of records, one per element matching the root.
pub fn extract(selectors: &Selectors) -> Result<String> {
    let spec = serde_json::to_string(selectors)?;
    Ok(format!("({EXTRACT_FN})({spec})"))
}

/// Evaluates to the number of scroll steps taken.
pub fn scroll_to_bottom() -> String {
    format!(
        r#"(async () => {{
  let lastHeight = document.documentElement.scrollHeight;
  let steps = 0;
  let stable = 0;
  while (steps < {MAX_SCROLL_STEPS} && stable < 3) {{
    window.scrollBy(0, {SCROLL_STEP_PX});
    await new Promise((r) => setTimeout(r, {SCROLL_DELAY_MS}));
    const height = document.documentElement.scrollHeight;
    const atBottom = window.innerHeight + window.scrollY >= height - 2;
    stable = height === lastHeight && atBottom ? stable + 1 : 0;
    lastHeight = height;
    steps += 1;
  }}
  return steps;
}})()"#
    )
}

/// Evaluates to the number of controls clicked.
pub fn expand_all() -> Result<String> {
    let selectors = serde_json::to_string(&EXPAND_BUTTONS.join(", "))?;
    Ok(format!(
        r#"(async () => {{
  let clicked = 0;
  for (let round = 0; round < {MAX_EXPAND_ROUNDS}; round++) {{
    const buttons = Array.from(document.querySelectorAll({selectors}))
      .filter((b) => b.offsetParent !== null && b.getAttribute('aria-expanded') !== 'true');
    if (buttons.length === 0) break;
    for (const button of buttons) {{
      button.click();
      clicked += 1;
      await new Promise((r) => setTimeout(r, 100));
    }}
  }}
  return clicked;
}})()"#
    ))
}

/// Clicks the first element matching `selector`. Evaluates to whether one
/// was found.
pub fn click(selector: &str) -> Result<String> {
    let selector = serde_json::to_string(selector)?;
    Ok(format!(
        r#"(() => {{
  const el = document.querySelector({selector});
  if (!el) return false;
  el.click();
  return true;
}})()"#
    ))
}
