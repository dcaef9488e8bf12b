use std::sync::Arc;

use crate::error::Error;
use crate::model::{EntryId, Section, SectionContent, SectionId, SectionKind};

/// Immutable section list produced by one store mutation.
pub type Snapshot = Arc<[Section]>;

type Listener = Box<dyn FnMut(&Snapshot)>;

/// Handle returned by [`SectionStore::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Owner of the ordered section list.
///
/// Every mutation builds a new list and swaps it in, so a `Snapshot` handed
/// out earlier never changes. Listeners registered with [`subscribe`] are
/// called with each new snapshot, in registration order, until they are
/// removed with [`unsubscribe`].
///
/// [`subscribe`]: SectionStore::subscribe
/// [`unsubscribe`]: SectionStore::unsubscribe
pub struct SectionStore {
    sections: Snapshot,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Default for SectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionStore {
    pub fn new() -> Self {
        Self::from_sections(Vec::new())
    }

    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self {
            sections: sections.into(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn sections(&self) -> Snapshot {
        Arc::clone(&self.sections)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false when `id` was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Append a new section of `kind` with blank content.
    pub fn add_section(&mut self, kind: SectionKind) -> SectionId {
        let section = Section::new(SectionContent::blank(kind));
        let id = section.id;
        let mut next = self.sections.to_vec();
        next.push(section);
        log::debug!("store: added {} section {id}", kind.key());
        self.replace(next);
        id
    }

    /// Replace a section's content with the result of `update`.
    /// The updated content must keep the section's kind.
    pub fn update_section<F>(&mut self, id: SectionId, update: F) -> Result<(), Error>
    where
        F: FnOnce(&SectionContent) -> SectionContent,
    {
        let idx = self.position(id)?;
        let current = &self.sections[idx].content;
        let content = update(current);
        if content.kind() != current.kind() {
            return Err(Error::ContentMismatch {
                expected: current.kind(),
                found: content.kind(),
            });
        }
        self.replace_content(idx, content);
        Ok(())
    }

    pub fn set_content(&mut self, id: SectionId, content: SectionContent) -> Result<(), Error> {
        self.update_section(id, move |_| content)
    }

    pub fn remove_section(&mut self, id: SectionId) -> Result<(), Error> {
        let idx = self.position(id)?;
        let mut next = self.sections.to_vec();
        next.remove(idx);
        log::debug!("store: removed section {id}");
        self.replace(next);
        Ok(())
    }

    /// Replace the whole list with a reordered one.
    pub fn reorder(&mut self, sections: Vec<Section>) {
        self.replace(sections);
    }

    /// Move the section at `from` so it ends up at index `to`.
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<(), Error> {
        let next = move_item(&self.sections, from, to)?;
        self.replace(next);
        Ok(())
    }

    /// Append a blank entry to a list section.
    pub fn add_entry(&mut self, section_id: SectionId) -> Result<EntryId, Error> {
        let idx = self.position(section_id)?;
        let (content, entry_id) = self.sections[idx].content.with_blank_entry()?;
        self.replace_content(idx, content);
        Ok(entry_id)
    }

    pub fn remove_entry(&mut self, section_id: SectionId, index: usize) -> Result<(), Error> {
        let idx = self.position(section_id)?;
        let content = self.sections[idx].content.without_entry(index)?;
        self.replace_content(idx, content);
        Ok(())
    }

    fn position(&self, id: SectionId) -> Result<usize, Error> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or(Error::SectionNotFound(id))
    }

    fn replace_content(&mut self, idx: usize, content: SectionContent) {
        let mut next = self.sections.to_vec();
        next[idx].content = content;
        self.replace(next);
    }

    fn replace(&mut self, next: Vec<Section>) {
        self.sections = next.into();
        let snapshot = Arc::clone(&self.sections);
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

/// New list with the element at `from` moved to index `to`; every other
/// element keeps its relative order.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, Error> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
    }
    let mut out = items.to_vec();
    let item = out.remove(from);
    out.insert(to, item);
    Ok(out)
}
