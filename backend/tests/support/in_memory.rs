//! In-memory doubles for the review, like, resource and student ports.
//!
//! Listings follow the Diesel adapters: exact filter, case-insensitive
//! substring search, the requested sort key and direction, then `id DESC` as
//! the tie-breaker.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pagination::Paginated;
use peerbridge::domain::listing::{ListRequest, ResourceSort, ReviewSort, SortDirection};
use peerbridge::domain::ports::{
    CourseReviewRepository, CourseReviewRepositoryError, ResourceRepository,
    ResourceRepositoryError, ReviewLikeRepository, ReviewLikeRepositoryError, StudentDirectory,
    StudentDirectoryError,
};
use peerbridge::domain::{
    CourseReview, LikeToggle, NewCourseReview, NewResource, Resource, ResourceExtension,
    ResourceId, ReviewId, Student, StudentId,
};

#[derive(Default)]
struct Tables {
    students: HashMap<StudentId, Student>,
    reviews: Vec<CourseReview>,
    likes: BTreeSet<(i32, i32)>,
    resources: Vec<Resource>,
}

/// Shared store standing in for PostgreSQL.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Store seeded with `students`.
    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
        let store = Self::default();
        {
            let mut tables = store.lock();
            for student in students {
                tables.students.insert(student.id, student);
            }
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX) + 1
}

fn stored_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn page_of<T, S>(
    mut rows: Vec<T>,
    request: &ListRequest<S>,
    by_key: impl Fn(&T, &T) -> Ordering,
    id: impl Fn(&T) -> i32,
) -> Paginated<T> {
    rows.sort_by(|a, b| {
        let primary = match request.direction {
            SortDirection::Asc => by_key(a, b),
            SortDirection::Desc => by_key(b, a),
        };
        primary.then_with(|| id(b).cmp(&id(a)))
    });
    let total = i64::try_from(rows.len()).unwrap_or(i64::MAX);
    let offset = usize::try_from(request.page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.page.limit()).unwrap_or(usize::MAX);
    let data = rows.into_iter().skip(offset).take(limit).collect();
    Paginated::new(data, request.page, total)
}

fn review_order(sort: ReviewSort) -> impl Fn(&CourseReview, &CourseReview) -> Ordering {
    move |a, b| match sort {
        ReviewSort::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        ReviewSort::ExperienceRating => a.experience_rating.cmp(&b.experience_rating),
        ReviewSort::LikesCount => a.likes_count.cmp(&b.likes_count),
        ReviewSort::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn resource_order(sort: ResourceSort) -> impl Fn(&Resource, &Resource) -> Ordering {
    move |a, b| match sort {
        ResourceSort::CreatedAt => a.created_at.cmp(&b.created_at),
        ResourceSort::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        ResourceSort::SkillName => a.skill_name.cmp(&b.skill_name),
    }
}

#[async_trait]
impl StudentDirectory for InMemoryStore {
    async fn find_by_ids(&self, ids: &[StudentId]) -> Result<Vec<Student>, StudentDirectoryError> {
        let tables = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| tables.students.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl CourseReviewRepository for InMemoryStore {
    async fn list(
        &self,
        request: &ListRequest<ReviewSort>,
    ) -> Result<Paginated<CourseReview>, CourseReviewRepositoryError> {
        let tables = self.lock();
        let rows: Vec<CourseReview> = tables
            .reviews
            .iter()
            .filter(|row| {
                request
                    .filter
                    .as_deref()
                    .is_none_or(|code| row.course_code == code)
            })
            .filter(|row| {
                request.search.as_deref().is_none_or(|term| {
                    contains_ci(&row.course_name, term) || contains_ci(&row.course_code, term)
                })
            })
            .cloned()
            .collect();
        Ok(page_of(rows, request, review_order(request.sort), |row| {
            row.id.get()
        }))
    }

    async fn for_course(
        &self,
        course_code: &str,
    ) -> Result<Vec<CourseReview>, CourseReviewRepositoryError> {
        let tables = self.lock();
        Ok(tables
            .reviews
            .iter()
            .filter(|row| row.course_code == course_code)
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        review: &NewCourseReview,
    ) -> Result<CourseReview, CourseReviewRepositoryError> {
        let mut tables = self.lock();
        if !tables.students.contains_key(&review.student_id) {
            return Err(CourseReviewRepositoryError::missing_student(
                review.student_id.get(),
            ));
        }
        let id = ReviewId::new(next_id(tables.reviews.len()));
        let stored = review.clone().into_stored(id, stored_at());
        tables.reviews.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ReviewLikeRepository for InMemoryStore {
    async fn toggle(
        &self,
        review_id: ReviewId,
        student_id: StudentId,
    ) -> Result<LikeToggle, ReviewLikeRepositoryError> {
        let mut tables = self.lock();
        if !tables.reviews.iter().any(|row| row.id == review_id) {
            return Err(ReviewLikeRepositoryError::review_not_found(review_id.get()));
        }
        if !tables.students.contains_key(&student_id) {
            return Err(ReviewLikeRepositoryError::missing_student(student_id.get()));
        }
        let key = (review_id.get(), student_id.get());
        let liked = if tables.likes.remove(&key) {
            false
        } else {
            tables.likes.insert(key);
            true
        };
        let like_count = i64::try_from(
            tables
                .likes
                .iter()
                .filter(|(review, _)| *review == review_id.get())
                .count(),
        )
        .unwrap_or(i64::MAX);
        if let Some(row) = tables.reviews.iter_mut().find(|row| row.id == review_id) {
            row.likes_count = like_count;
        }
        Ok(LikeToggle { liked, like_count })
    }

    async fn is_liked(
        &self,
        review_id: ReviewId,
        student_id: StudentId,
    ) -> Result<bool, ReviewLikeRepositoryError> {
        Ok(self
            .lock()
            .likes
            .contains(&(review_id.get(), student_id.get())))
    }
}

#[async_trait]
impl ResourceRepository for InMemoryStore {
    async fn list(
        &self,
        request: &ListRequest<ResourceSort>,
    ) -> Result<Paginated<Resource>, ResourceRepositoryError> {
        let tables = self.lock();
        let rows: Vec<Resource> = tables
            .resources
            .iter()
            .filter(|row| {
                request
                    .filter
                    .as_deref()
                    .is_none_or(|category| row.category == category)
            })
            .filter(|row| {
                request
                    .search
                    .as_deref()
                    .is_none_or(|term| contains_ci(&row.skill_name, term))
            })
            .cloned()
            .collect();
        Ok(page_of(rows, request, resource_order(request.sort), |row| {
            row.id.get()
        }))
    }

    async fn by_skill_name(&self, skill_name: &str) -> Result<Vec<Resource>, ResourceRepositoryError> {
        let tables = self.lock();
        Ok(tables
            .resources
            .iter()
            .filter(|row| row.skill_name == skill_name)
            .cloned()
            .collect())
    }

    async fn insert(&self, resource: &NewResource) -> Result<Resource, ResourceRepositoryError> {
        let mut tables = self.lock();
        let id = ResourceId::new(next_id(tables.resources.len()));
        let stored = resource.clone().into_stored(id, stored_at());
        tables.resources.push(stored.clone());
        Ok(stored)
    }

    async fn extend(
        &self,
        extension: &ResourceExtension,
    ) -> Result<Option<Resource>, ResourceRepositoryError> {
        let mut tables = self.lock();
        let Some(row) = tables
            .resources
            .iter_mut()
            .find(|row| row.skill_name == extension.skill_name)
        else {
            return Ok(None);
        };
        let (links, tags) = row.extended_lists(extension);
        row.resource_links = links;
        row.tags = tags;
        Ok(Some(row.clone()))
    }
}
