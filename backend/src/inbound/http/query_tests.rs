//! Tests for the typed query layer.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use pagination::Paginated;
use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::CourseReviewService;
use crate::domain::ports::{FixtureStudentDirectory, MockCourseReviewRepository};
use crate::domain::test_support::review;
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{signed_in_cookie, test_app};

fn query(operation: &str, variables: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/query")
        .set_json(json!({ "operation": operation, "variables": variables }))
}

#[rstest]
#[case(json!({ "page": "3", "limit": 5 }), 3, 5)]
#[case(json!({ "page": "x", "limit": -2 }), 1, 10)]
#[case(Value::Null, 1, 10)]
#[actix_web::test]
async fn all_courses_sorts_by_creation_with_lenient_paging(
    #[case] variables: Value,
    #[case] page: i64,
    #[case] limit: i64,
) {
    let mut reviews = MockCourseReviewRepository::new();
    reviews
        .expect_list()
        .withf(move |request| {
            request.sort == ReviewSort::CreatedAt
                && request.direction == SortDirection::Desc
                && request.page.page() == page
                && request.page.limit() == limit
        })
        .times(1)
        .return_once(|request| Ok(Paginated::new(vec![review(1, 2, 3)], request.page, 1)));
    let service = Arc::new(CourseReviewService::new(
        Arc::new(reviews),
        Arc::new(FixtureStudentDirectory),
    ));
    let state = HttpState::from(HttpStatePorts {
        reviews: service,
        ..HttpStatePorts::default()
    });
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(&app, query("allCourses", variables).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["data"][0]["courseCode"], "CS201");
    assert_eq!(body["data"][0]["studentName"], "Fixture Student");
}

#[actix_web::test]
async fn unknown_operations_are_rejected() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let res = actix_test::call_service(&app, query("dropTables", json!({})).to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Unknown operation: dropTables");
}

#[rstest]
#[case("courseDetails", json!({}), StatusCode::BAD_REQUEST)]
#[case("courseDetails", json!({ "courseCode": "CS999" }), StatusCode::NOT_FOUND)]
#[case("resource", json!({ "skillName": "cobol" }), StatusCode::NOT_FOUND)]
#[case("addCourse", json!({}), StatusCode::BAD_REQUEST)]
#[case("addCourse", json!({ "input": {} }), StatusCode::UNAUTHORIZED)]
#[case("addSkill", json!({ "input": {} }), StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn errors_match_the_rest_surface(
    #[case] operation: &str,
    #[case] variables: Value,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let res = actix_test::call_service(&app, query(operation, variables).to_request()).await;
    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn experience_by_company_returns_a_list() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let res = actix_test::call_service(
        &app,
        query("experienceByCompany", json!({ "companyName": "Initech" })).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({ "data": [] }));
}

#[actix_web::test]
async fn add_course_returns_the_rest_dto() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;
    let cookie = signed_in_cookie(&app, 4).await;
    let input = json!({
        "courseName": "Databases",
        "courseCode": "CS340",
        "instructorNames": "Codd",
        "institution": "State University",
        "semester": "Fall 2024",
        "studentId": 4,
        "rating": 5,
        "reviewContent": "Normal forms everywhere.",
    });

    let res = actix_test::call_service(
        &app,
        query("addCourse", json!({ "input": input }))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["data"]["instructorNames"], json!(["Codd"]));
    assert_eq!(body["data"]["likeCount"], 0);
    assert_eq!(body["data"]["studentId"], 4);
}

#[rstest]
#[case("addCourse")]
#[case("addExperience")]
#[actix_web::test]
async fn mutations_without_a_student_id_name_the_field(#[case] operation: &str) {
    let app = actix_test::init_service(test_app(HttpState::default())).await;
    let cookie = signed_in_cookie(&app, 4).await;
    let input = json!({
        "courseName": "Databases",
        "courseCode": "CS340",
        "companyName": "Initech",
        "rating": 5,
    });

    let res = actix_test::call_service(
        &app,
        query(operation, json!({ "input": input }))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "studentId");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[rstest]
#[case(1, StatusCode::OK)]
#[case(3, StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn add_skill_is_admin_only(#[case] student_id: i32, #[case] expected: StatusCode) {
    let app = actix_test::init_service(test_app(HttpState::default())).await;
    let cookie = signed_in_cookie(&app, student_id).await;
    let input = json!({
        "skillName": "sql",
        "description": "Query languages",
        "category": "Databases",
        "resourceLinks": ["https://www.postgresql.org/docs/"],
    });

    let res = actix_test::call_service(
        &app,
        query("addSkill", json!({ "input": input }))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), expected);
}

#[rstest]
#[case(Some(json!(4)), Some(4))]
#[case(Some(json!(" 7 ")), Some(7))]
#[case(Some(json!("seven")), None)]
#[case(Some(json!(true)), None)]
#[case(None, None)]
fn lenient_ints(#[case] raw: Option<Value>, #[case] expected: Option<i64>) {
    assert_eq!(lenient_int(raw.as_ref()), expected);
}
