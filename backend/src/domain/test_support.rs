//! Sample domain values shared by unit tests.

use chrono::{DateTime, TimeZone, Utc};

use super::{
    CourseReview, Experience, ExperienceId, Resource, ResourceId, ReviewId, Student, StudentId,
};

pub(crate) fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

pub(crate) fn student(id: i32, name: &str) -> Student {
    Student::new(StudentId::new(id), name, format!("s{id}@example.edu"))
}

pub(crate) fn review(id: i32, author: i32, rating: i32) -> CourseReview {
    CourseReview {
        id: ReviewId::new(id),
        course_name: "Data Structures".to_owned(),
        course_code: "CS201".to_owned(),
        instructor_names: vec!["A Prof".to_owned()],
        institution: "State University".to_owned(),
        semester: "Spring 2024".to_owned(),
        student_id: StudentId::new(author),
        experience_rating: rating,
        review_text: "Solid course.".to_owned(),
        tips: Some(String::new()),
        likes_count: 0,
        created_at: at(1),
        updated_at: at(2),
    }
}

pub(crate) fn experience(id: i32, author: i32, company: &str) -> Experience {
    Experience {
        id: ExperienceId::new(id),
        student_id: StudentId::new(author),
        company_name: company.to_owned(),
        position: "Intern".to_owned(),
        interview_type: "Virtual".to_owned(),
        interview_rounds: 2,
        duration: None,
        location: "Remote".to_owned(),
        difficulty_level: "Easy".to_owned(),
        questions: None,
        narrative: None,
        outcome: "Offer".to_owned(),
        feedback: None,
        tips: None,
        prep_links: Vec::new(),
        resources: None,
        created_at: at(1),
        updated_at: at(1),
    }
}

pub(crate) fn resource(id: i32, skill: &str) -> Resource {
    Resource {
        id: ResourceId::new(id),
        skill_name: skill.to_owned(),
        description: format!("Learn {skill}"),
        category: "Programming".to_owned(),
        resource_links: vec![format!("https://example.org/{skill}")],
        tags: Vec::new(),
        created_at: at(1),
        updated_at: at(1),
    }
}
