use rocket::http::{ContentType, Cookie, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{Value, json};

use crumbtrail_api::orm::testing::{
    TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD, TEST_EMPLOYEE_EMAIL, TEST_EMPLOYEE_PASSWORD,
    TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD, test_rocket,
};

struct LoggedIn {
    session: Cookie<'static>,
    xsrf: Cookie<'static>,
    profile_id: i64,
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
    let envelope: Value = response.into_json().await.expect("valid JSON envelope");
    let profile_id = envelope["data"]["profile_id"].as_i64().expect("profile id");
    LoggedIn {
        session,
        xsrf,
        profile_id,
    }
}

fn xsrf_header(login: &LoggedIn) -> Header<'static> {
    Header::new("X-XSRF-TOKEN", login.xsrf.value().to_string())
}

#[rocket::async_test]
async fn test_get_own_profile_excludes_secrets() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let owner = login(&client, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD).await;

    let response = client
        .get(format!("/api/1/profiles/{}", owner.profile_id))
        .cookie(owner.session.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let envelope: Value = response.into_json().await.expect("valid JSON envelope");
    let data = &envelope["data"];
    assert_eq!(data["profile_email"], TEST_OWNER_EMAIL);
    assert!(data.get("profile_hash").is_none());
    assert!(data.get("profile_salt").is_none());
    assert!(data.get("profile_access_token").is_none());
    assert!(data.get("profile_activation_token").is_none());
}

#[rocket::async_test]
async fn test_unauthenticated_profile_read_is_rejected() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");

    let response = client.get("/api/1/profiles/1").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[rocket::async_test]
async fn test_profile_is_confidential_to_other_callers() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let owner = login(&client, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD).await;
    let employee = login(&client, TEST_EMPLOYEE_EMAIL, TEST_EMPLOYEE_PASSWORD).await;

    let response = client
        .get(format!("/api/1/profiles/{}", employee.profile_id))
        .cookie(owner.session.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);

    // An admin can read anyone's profile.
    let admin = login(&client, TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD).await;
    let response = client
        .get(format!("/api/1/profiles/{}", employee.profile_id))
        .cookie(admin.session.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn test_profile_listing_is_admin_only() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let owner = login(&client, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD).await;

    let response = client
        .get("/api/1/profiles")
        .cookie(owner.session.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);

    let admin = login(&client, TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD).await;
    let response = client
        .get("/api/1/profiles")
        .cookie(admin.session.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let envelope: Value = response.into_json().await.expect("valid JSON envelope");
    let profiles = envelope["data"].as_array().expect("profiles array");
    assert!(profiles.iter().any(|p| p["profile_email"] == TEST_OWNER_EMAIL));
    assert!(profiles.iter().any(|p| p["profile_email"] == TEST_ADMIN_EMAIL));
}

#[rocket::async_test]
async fn test_put_profile_updates_mutable_fields() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let owner = login(&client, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD).await;

    let response = client
        .put(format!("/api/1/profiles/{}", owner.profile_id))
        .header(ContentType::JSON)
        .header(xsrf_header(&owner))
        .cookie(owner.session.clone())
        .cookie(owner.xsrf.clone())
        .body(
            json!({
                "profile_name": "Terry T. Taco",
                "profile_email": TEST_OWNER_EMAIL,
                "profile_phone": "5055550000",
                "profile_type": "o"
            })
            .to_string(),
        )
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let envelope: Value = response.into_json().await.expect("valid JSON envelope");
    assert_eq!(envelope["data"]["profile_name"], "Terry T. Taco");
    assert_eq!(envelope["data"]["profile_phone"], "5055550000");
    assert_eq!(envelope["message"], "the profile was updated");
}

#[rocket::async_test]
async fn test_put_profile_rejects_oversized_name() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let owner = login(&client, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD).await;

    let response = client
        .put(format!("/api/1/profiles/{}", owner.profile_id))
        .header(ContentType::JSON)
        .header(xsrf_header(&owner))
        .cookie(owner.session.clone())
        .cookie(owner.xsrf.clone())
        .body(
            json!({
                "profile_name": "x".repeat(129),
                "profile_email": TEST_OWNER_EMAIL,
                "profile_phone": "5055550000",
                "profile_type": "o"
            })
            .to_string(),
        )
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::UnprocessableEntity);
    let envelope: Value = response.into_json().await.expect("valid JSON envelope");
    assert!(
        envelope["message"]
            .as_str()
            .unwrap()
            .contains("profile_name is longer than 128")
    );
}

#[rocket::async_test]
async fn test_mutation_without_xsrf_header_is_forbidden() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let owner = login(&client, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD).await;

    let response = client
        .put(format!("/api/1/profiles/{}", owner.profile_id))
        .header(ContentType::JSON)
        .cookie(owner.session.clone())
        .cookie(owner.xsrf.clone())
        .body(
            json!({
                "profile_name": "Terry",
                "profile_email": TEST_OWNER_EMAIL,
                "profile_phone": "5055550000",
                "profile_type": "o"
            })
            .to_string(),
        )
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Forbidden);
}

#[rocket::async_test]
async fn test_get_nonexistent_profile_is_not_found() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin = login(&client, TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD).await;

    let response = client
        .get("/api/1/profiles/99999")
        .cookie(admin.session.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn test_delete_profile_requires_identity_and_removes_row() {
    let client = Client::untracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let owner = login(&client, TEST_OWNER_EMAIL, TEST_OWNER_PASSWORD).await;
    let employee = login(&client, TEST_EMPLOYEE_EMAIL, TEST_EMPLOYEE_PASSWORD).await;

    // The owner cannot delete the employee's profile.
    let response = client
        .delete(format!("/api/1/profiles/{}", employee.profile_id))
        .header(xsrf_header(&owner))
        .cookie(owner.session.clone())
        .cookie(owner.xsrf.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);

    // The employee can delete their own profile.
    let response = client
        .delete(format!("/api/1/profiles/{}", employee.profile_id))
        .header(xsrf_header(&employee))
        .cookie(employee.session.clone())
        .cookie(employee.xsrf.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    // The deleted profile is gone, along with its sessions.
    let response = client
        .get(format!("/api/1/profiles/{}", employee.profile_id))
        .cookie(employee.session.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
}
