//! Parameterised listing SQL for the paginated entity tables.
//!
//! Table names, column names and sort keys only ever come from the `'static`
//! descriptors in this module. Client text reaches the database exclusively
//! as bound `$n` parameters.

use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Text};

use crate::domain::listing::{ExperienceSort, ListRequest, ResourceSort, ReviewSort, SortDirection};

/// Static description of a listable table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListTable {
    pub table: &'static str,
    pub columns: &'static str,
    pub key: &'static str,
    pub filter_column: &'static str,
    pub search_columns: &'static [&'static str],
}

pub(crate) const COURSE_REVIEWS: ListTable = ListTable {
    table: "course_reviews",
    columns: "id, course_name, course_code, instructor_names, institution, semester, \
              student_id, experience_rating, review_text, tips, likes_count, created_at, \
              updated_at",
    key: "id",
    filter_column: "course_code",
    search_columns: &["course_name", "course_code"],
};

pub(crate) const EXPERIENCES: ListTable = ListTable {
    table: "experiences",
    columns: "id, student_id, company_name, position, interview_type, interview_rounds, \
              duration, interview_location, difficulty_level, interview_questions, \
              interview_experience, outcome, feedback, tips, prep_links, resources, \
              created_at, updated_at",
    key: "id",
    filter_column: "company_name",
    search_columns: &["company_name", "position"],
};

pub(crate) const RESOURCES: ListTable = ListTable {
    table: "resources",
    columns: "id, skill_name, description, category, resource_links, tags, created_at, \
              updated_at",
    key: "id",
    filter_column: "category",
    search_columns: &["skill_name"],
};

/// Maps a whitelisted sort key to its column.
pub(crate) trait SortColumn: Copy {
    fn column(self) -> &'static str;
}

impl SortColumn for ReviewSort {
    fn column(self) -> &'static str {
        match self {
            Self::UpdatedAt => "updated_at",
            Self::ExperienceRating => "experience_rating",
            Self::LikesCount => "likes_count",
            Self::CreatedAt => "created_at",
        }
    }
}

impl SortColumn for ExperienceSort {
    fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::InterviewRounds => "interview_rounds",
            Self::CompanyName => "company_name",
        }
    }
}

impl SortColumn for ResourceSort {
    fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::SkillName => "skill_name",
        }
    }
}

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SqlParam {
    Text(String),
    BigInt(i64),
}

/// Data and count statements sharing one WHERE fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
    pub count_sql: String,
    pub count_params: Vec<SqlParam>,
}

/// Build the page and count statements for one listing request.
pub(crate) fn build_list_query<S: SortColumn>(
    table: &ListTable,
    request: &ListRequest<S>,
) -> ListQuery {
    let mut predicates = Vec::new();
    let mut params = Vec::new();

    if let Some(filter) = &request.filter {
        params.push(SqlParam::Text(filter.clone()));
        predicates.push(format!("{} = ${}", table.filter_column, params.len()));
    }

    if let Some(term) = &request.search {
        params.push(SqlParam::Text(format!("%{}%", escape_like(term))));
        let slot = params.len();
        let matches = table
            .search_columns
            .iter()
            .map(|column| format!("{column} ILIKE ${slot} ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" OR ");
        predicates.push(format!("({matches})"));
    }

    let where_clause = if predicates.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", predicates.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) AS total FROM {}{where_clause}", table.table);
    let count_params = params.clone();

    let direction = match request.direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    params.push(SqlParam::BigInt(request.page.limit()));
    let limit_slot = params.len();
    params.push(SqlParam::BigInt(request.page.offset()));
    let offset_slot = params.len();

    let sql = format!(
        "SELECT {columns} FROM {table}{where_clause} ORDER BY {sort} {direction}, {key} DESC \
         LIMIT ${limit_slot} OFFSET ${offset_slot}",
        columns = table.columns,
        table = table.table,
        sort = request.sort.column(),
        key = table.key,
    );

    ListQuery {
        sql,
        params,
        count_sql,
        count_params,
    }
}

/// Bind every parameter in order onto a raw statement.
pub(crate) fn bind_params(
    sql: String,
    params: Vec<SqlParam>,
) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    params
        .into_iter()
        .fold(diesel::sql_query(sql).into_boxed(), |query, param| {
            match param {
                SqlParam::Text(value) => query.bind::<Text, _>(value),
                SqlParam::BigInt(value) => query.bind::<BigInt, _>(value),
            }
        })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
