use crate::domain::{AnnotatedCompany, Company};
use crate::visibility::VisibilitySet;

/// Annotate a fetched page against the hidden set.
///
/// Hidden companies come first, then visible ones. Each partition keeps the
/// order the items were given in. With nothing hidden the input order is
/// returned as-is.
pub fn reconcile<I>(items: I, hidden: &VisibilitySet) -> Vec<AnnotatedCompany>
where
    I: IntoIterator<Item = Company>,
{
    if hidden.is_empty() {
        return items
            .into_iter()
            .map(|c| AnnotatedCompany::new(c, true))
            .collect();
    }

    let (hidden_part, visible_part): (Vec<Company>, Vec<Company>) =
        items.into_iter().partition(|c| hidden.is_hidden(&c.id));

    let mut out = Vec::with_capacity(hidden_part.len() + visible_part.len());
    out.extend(hidden_part.into_iter().map(|c| AnnotatedCompany::new(c, false)));
    out.extend(visible_part.into_iter().map(|c| AnnotatedCompany::new(c, true)));
    out
}
