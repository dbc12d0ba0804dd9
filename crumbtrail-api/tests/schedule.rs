use rocket::http::{ContentType, Cookie, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{Value, json};

use crumbtrail_api::orm::testing::{
    TEST_EMPLOYEE_EMAIL, TEST_EMPLOYEE_PASSWORD, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD,
    test_rocket,
};

struct LoggedIn {
    session: Cookie<'static>,
    xsrf: Cookie<'static>,
}

async fn login(client: &Client, email: &str, password: &str) -> LoggedIn {
    let response = client
        .post("/api/1/login")
        .header(ContentType::JSON)
        .body(json!({ "email": email, "password": password }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let session = response
        .cookies()
        .get("session")
        .expect("session cookie should be set")
        .clone()
        .into_owned();
    let xsrf = response
        .cookies()
        .get("XSRF-TOKEN")
        .expect("XSRF cookie should be set")
        .clone()
        .into_owned();
    LoggedIn { session, xsrf }
}

fn xsrf_header(login: &LoggedIn) -> Header<'static> {
    Header::new("X-XSRF-TOKEN", login.xsrf.value().to_string())
}

async fn tacos_company_id(client: &Client) -> i64 {
    let response = client.get("/api/1/companies").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let envelope: Value = response.into_json().await.expect("valid JSON envelope");
    envelope["data"]
        .as_array()
        .expect("companies array")
        .iter()
        .find(|c| c["company_name"] == "Terry's Tacos")
        .expect("the taco truck should be approved")["company_id"]
        .as_i64()
        .expect("company id")
}

fn schedule_body(company_id: i64) -> Value {
    json!({
        "schedule_company_id": company_id,
        "schedule_day_of_week": "Wednesday",
        "schedule_start_time": "17:00",
        "schedule_end_time": "21:30",
        "schedule_location_name": "418 Teapot Event",
        "schedule_location_address": "9201 Spicy Food Ln SW, Albuquerque NM 87114"
    })
}

#[rocket::async_test]
async fn test_owner_creates_updates_and_deletes_a_schedule() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let owner = login(&client, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD).await;
    let company_id = tacos_company_id(&client).await;

    let response = client
        .post("/api/1/schedules")
        .header(ContentType::JSON)
        .header(xsrf_header(&owner))
        .cookie(owner.session.clone())
        .cookie(owner.xsrf.clone())
        .body(schedule_body(company_id).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let envelope: Value = response.into_json().await.expect("valid JSON envelope");
    let schedule_id = envelope["data"]["schedule_id"].as_i64().expect("assigned key");
    assert!(schedule_id > 0);
    assert_eq!(envelope["data"]["schedule_day_of_week"], "Wednesday");
    assert_eq!(envelope["data"]["schedule_start_time"], "17:00:00");

    // Anyone can read it back.
    let response = client
        .get(format!("/api/1/schedules/{schedule_id}"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    // Move the slot to Friday.
    let mut update = schedule_body(company_id);
    update["schedule_day_of_week"] = json!("Friday");
    let response = client
        .put(format!("/api/1/schedules/{schedule_id}"))
        .header(ContentType::JSON)
        .header(xsrf_header(&owner))
        .cookie(owner.session.clone())
        .cookie(owner.xsrf.clone())
        .body(update.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let envelope: Value = response.into_json().await.expect("valid JSON envelope");
    assert_eq!(envelope["data"]["schedule_day_of_week"], "Friday");

    let response = client
        .delete(format!("/api/1/schedules/{schedule_id}"))
        .header(xsrf_header(&owner))
        .cookie(owner.session.clone())
        .cookie(owner.xsrf.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let response = client
        .get(format!("/api/1/schedules/{schedule_id}"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn test_schedule_with_unknown_day_is_rejected() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let owner = login(&client, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD).await;
    let company_id = tacos_company_id(&client).await;

    let mut body = schedule_body(company_id);
    body["schedule_day_of_week"] = json!("Taco Tuesday");

    let response = client
        .post("/api/1/schedules")
        .header(ContentType::JSON)
        .header(xsrf_header(&owner))
        .cookie(owner.session.clone())
        .cookie(owner.xsrf.clone())
        .body(body.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let envelope: Value = response.into_json().await.expect("valid JSON envelope");
    assert!(
        envelope["message"]
            .as_str()
            .unwrap()
            .contains("schedule_day_of_week")
    );
}

#[rocket::async_test]
async fn test_employee_cannot_manage_the_schedule() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let employee = login(&client, TEST_EMPLOYEE_EMAIL, TEST_EMPLOYEE_PASSWORD).await;
    let company_id = tacos_company_id(&client).await;

    let response = client
        .post("/api/1/schedules")
        .header(ContentType::JSON)
        .header(xsrf_header(&employee))
        .cookie(employee.session.clone())
        .cookie(employee.xsrf.clone())
        .body(schedule_body(company_id).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);
}

#[rocket::async_test]
async fn test_unauthenticated_schedule_creation_is_rejected() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let company_id = tacos_company_id(&client).await;

    let response = client
        .post("/api/1/schedules")
        .header(ContentType::JSON)
        .body(schedule_body(company_id).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
}
