#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    List,
}

/// One column of the movie schema. The table below drives form prompts,
/// required-field validation, payload transformation, column rendering and
/// sort-key selection, so adding a field means adding one row here plus its
/// accessor arm in `Movie::field`.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

pub const MOVIE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        label: "Title",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSpec {
        // The backend serializer calls this key "genre" even though it
        // carries a list of genre names.
        name: "genre",
        label: "Genres",
        kind: FieldKind::List,
        required: false,
    },
    FieldSpec {
        name: "actors",
        label: "Actors",
        kind: FieldKind::List,
        required: false,
    },
    FieldSpec {
        name: "director",
        label: "Director",
        kind: FieldKind::Text,
        required: false,
    },
    FieldSpec {
        name: "runtime_min",
        label: "Runtime",
        kind: FieldKind::Integer,
        required: false,
    },
    FieldSpec {
        name: "rating",
        label: "Rating",
        kind: FieldKind::Decimal,
        required: true,
    },
];

pub fn field(name: &str) -> Option<&'static FieldSpec> {
    MOVIE_FIELDS.iter().find(|f| f.name == name)
}

pub fn default_sort_field() -> &'static FieldSpec {
    field("title").expect("schema always carries a title column")
}
