//! Open-file tab strip
//!
//! Tracks the files opened from a project in tab-open order with one
//! active tab. Invariant: the active index always addresses a valid
//! element, or there are no tabs at all. Closing the active tab
//! activates the nearest remaining tab by index, clamped to bounds.

/// One open file buffer
///
/// `content` diverges from the server copy until saved; `dirty` flips
/// true on any edit and false only after a successful save.
#[derive(Debug, Clone)]
pub struct OpenFile {
    pub path: String,
    pub content: String,
    pub language: String,
    pub dirty: bool,
}

impl OpenFile {
    /// Create a clean buffer as fetched from the server
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            language: language.into(),
            dirty: false,
        }
    }
}

/// Tab strip holding open files in open order
#[derive(Debug, Clone, Default)]
pub struct TabStrip {
    files: Vec<OpenFile>,
    active: Option<usize>,
}

impl TabStrip {
    /// Create an empty strip
    pub fn new() -> Self {
        Self::default()
    }

    /// All open files in tab order
    pub fn files(&self) -> &[OpenFile] {
        &self.files
    }

    /// Index of the active tab, when any tab is open
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active file, when any tab is open
    pub fn active(&self) -> Option<&OpenFile> {
        self.active.map(|i| &self.files[i])
    }

    /// Mutable access to the active file
    pub fn active_mut(&mut self) -> Option<&mut OpenFile> {
        let idx = self.active?;
        self.files.get_mut(idx)
    }

    /// Index of an open tab by path
    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.files.iter().position(|f| f.path == path)
    }

    /// Whether a path is already open
    pub fn is_open(&self, path: &str) -> bool {
        self.index_of(path).is_some()
    }

    /// Number of open tabs
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no tabs are open
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Make an already-open tab active
    ///
    /// Returns false for an out-of-range index, leaving state unchanged.
    pub fn activate(&mut self, index: usize) -> bool {
        if index < self.files.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    /// Append a newly fetched file and make it active
    pub fn open(&mut self, file: OpenFile) {
        self.files.push(file);
        self.active = Some(self.files.len() - 1);
    }

    /// Close the tab at `index`, returning the removed file
    ///
    /// When the closed tab was active, the nearest remaining tab by
    /// index becomes active (clamped to the new bounds); an emptied
    /// strip has no active tab.
    pub fn close(&mut self, index: usize) -> Option<OpenFile> {
        if index >= self.files.len() {
            return None;
        }
        let removed = self.files.remove(index);

        self.active = match self.active {
            None => None,
            Some(_) if self.files.is_empty() => None,
            Some(active) if active == index => Some(index.min(self.files.len() - 1)),
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        Some(removed)
    }

    /// Replace the active file's content, marking it dirty
    ///
    /// Returns false when no tab is active.
    pub fn edit_active(&mut self, content: impl Into<String>) -> bool {
        match self.active_mut() {
            Some(file) => {
                file.content = content.into();
                file.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Clear the active file's dirty flag after a successful save
    pub fn mark_active_saved(&mut self) {
        if let Some(file) = self.active_mut() {
            file.dirty = false;
        }
    }

    /// Close every tab
    pub fn clear(&mut self) {
        self.files.clear();
        self.active = None;
    }

    /// Check the active-index invariant (used by tests)
    pub fn invariant_holds(&self) -> bool {
        match self.active {
            None => true,
            Some(i) => i < self.files.len(),
        }
    }
}
