#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Closed set of sortable columns. Sort expressions arrive as free text, so
/// anything that should reach an ORDER BY clause has to go through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    GovId,
    Program,
    InstallDate,
    Latitude,
    Longitude,
    Neighborhood,
    Borough,
}

impl SortField {
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "id" => Some(Self::Id),
            "govId" | "gov_id" => Some(Self::GovId),
            "program" => Some(Self::Program),
            "installDate" | "install_date" => Some(Self::InstallDate),
            "latitude" => Some(Self::Latitude),
            "longitude" => Some(Self::Longitude),
            "neighborhood" | "colonia" => Some(Self::Neighborhood),
            "borough" => Some(Self::Borough),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    /// Parses the `field[,asc|desc]` form used in query strings. The
    /// direction defaults to ascending when omitted.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(2, ',');
        let field = SortField::parse(parts.next()?.trim())?;
        let direction = parts.next().map(|part| part.trim().to_ascii_lowercase());
        let direction = match direction.as_deref() {
            None | Some("") | Some("asc") => SortDirection::Ascending,
            Some("desc") => SortDirection::Descending,
            Some(_) => return None,
        };
        Some(SortOrder { field, direction })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: usize, size: usize, sort: Vec<SortOrder>) -> Self {
        Self { page, size, sort }
    }

    /// Index of the first record on this page, saturating at `usize::MAX`.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One slice of a result set, together with the size of the whole set. A page
/// past the end of the data is valid and simply has empty content.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
