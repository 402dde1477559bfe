use dashboard_core::{ServiceError, TodoDraft, TodoListService, TodoRepository};

const DEMO_TITLES: &[(&str, &str)] = &[
    ("Write documentation", "Describe the reorder endpoint"),
    ("Check open reviews", ""),
    ("Draft release notes", "Collect merged changes since the last tag"),
];

/// Fill an empty list with demo items. Returns how many were inserted; a
/// list that already has items is left alone.
pub fn seed_demo_items<R: TodoRepository>(
    service: &mut TodoListService<R>,
) -> Result<usize, ServiceError> {
    if !service.list_ordered()?.is_empty() {
        return Ok(0);
    }
    for (title, description) in DEMO_TITLES {
        let mut draft = TodoDraft::new(*title);
        if !description.is_empty() {
            draft = draft.with_description(*description);
        }
        service.upsert(draft)?;
    }
    Ok(DEMO_TITLES.len())
}
