use hashbrown::HashSet;

use crate::model::FileReference;

/// Distinct file references collected by a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    files: HashSet<FileReference>,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `file`, replacing an equal reference already present
    ///
    /// Returns `true` if the reference was not present before.
    pub fn insert(&mut self, file: FileReference) -> bool {
        self.files.replace(file).is_none()
    }

    #[must_use]
    pub fn contains(&self, file: &FileReference) -> bool {
        self.files.contains(file)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileReference> {
        self.files.iter()
    }

    /// References ordered by location, then description
    #[must_use]
    pub fn into_sorted(self) -> Vec<FileReference> {
        let mut files: Vec<_> = self.files.into_iter().collect();
        files.sort_unstable();
        files
    }
}

impl Extend<FileReference> for ResultSet {
    fn extend<T: IntoIterator<Item = FileReference>>(&mut self, iter: T) {
        for file in iter {
            self.insert(file);
        }
    }
}

impl FromIterator<FileReference> for ResultSet {
    fn from_iter<T: IntoIterator<Item = FileReference>>(iter: T) -> Self {
        let mut set = ResultSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ResultSet {
    type Item = FileReference;
    type IntoIter = hashbrown::hash_set::IntoIter<FileReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}
