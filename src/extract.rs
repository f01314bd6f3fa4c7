use scraper::{ElementRef, Selector};

/// How to locate the element whose text is wanted.
#[derive(Debug, Clone, Copy)]
pub enum Extract<'a> {
    /// First element with attribute `name` equal to `value`, e.g. `itemprop="gender"`.
    Attribute { name: &'a str, value: &'a str },
    /// First element matching a CSS selector.
    Selector(&'a Selector),
    /// First `value` element found inside an `item` element whose text
    /// contains `label`. Labelled items without a `value` element are
    /// skipped in favour of later ones.
    Labelled {
        item: &'a Selector,
        label: &'a str,
        value: &'a Selector,
    },
}

/// Returns the trimmed text of the element located by `how` under `root`,
/// or `None` when nothing matches.
///
/// Pass `Html::root_element()` to search a whole document.
pub fn extract(root: ElementRef<'_>, how: &Extract<'_>) -> Option<String> {
    let el = match *how {
        Extract::Attribute { name, value } => root
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().attr(name) == Some(value)),
        Extract::Selector(selector) => root.select(selector).next(),
        Extract::Labelled { item, label, value } => root
            .select(item)
            .filter(|el| text_of(*el).contains(label))
            .find_map(|el| el.select(value).next()),
    }?;

    Some(text_of(el).trim().to_string())
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
