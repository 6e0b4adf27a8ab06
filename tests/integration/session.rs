use crate::common::TestApp;

#[tokio::test]
async fn signed_out_visitors_get_the_sign_in_page() {
    let app = TestApp::spawn().await;

    let res = app.get("/").await;

    assert_eq!(res.status, 200);
    assert!(res.text.contains("Sign in"));
    assert!(app.get("/api/session").await.body["user"].is_null());
}

#[tokio::test]
async fn any_complete_credentials_sign_in() {
    let app = TestApp::spawn().await;

    app.login("faculty", "Prof Hopper", "hopper@uni.edu").await;

    let session = app.get("/api/session").await.body;
    assert_eq!(session["role"], "faculty");
    assert_eq!(session["user"]["email"], "hopper@uni.edu");
    assert_eq!(session["submitting"], false);

    let page = app.get("/").await;
    assert!(page.text.contains("Prof Hopper"));
    assert!(page.text.contains("Overview"));
}

#[tokio::test]
async fn unknown_role_is_silently_refused() {
    let app = TestApp::spawn().await;

    let res = app
        .post_form(
            "/login",
            &[
                ("role", "superuser"),
                ("name", "Mallory"),
                ("email", "m@uni.edu"),
                ("password", "x"),
            ],
        )
        .await;

    assert_eq!(res.status, 200);
    assert!(res.text.contains("Sign in"));
    assert!(app.get("/api/session").await.body["user"].is_null());
}

#[tokio::test]
async fn blank_password_is_silently_refused() {
    let app = TestApp::spawn().await;

    let res = app
        .post_form(
            "/login",
            &[
                ("role", "admin"),
                ("name", "Mallory"),
                ("email", "m@uni.edu"),
                ("password", ""),
            ],
        )
        .await;

    assert_eq!(res.status, 200);
    assert!(app.get("/api/session").await.body["user"].is_null());
}

#[tokio::test]
async fn logout_keeps_submissions() {
    let app = TestApp::spawn().await;
    app.login("student", "Ada", "ada@uni.edu").await;
    app.submit_and_wait("CS101", "HW1", &[("a.pdf", 10)]).await;

    app.post_form("/logout", &[]).await;
    assert!(app.get("/api/session").await.body["user"].is_null());
    assert!(app.submissions("").await.is_empty());

    app.login("admin", "Root", "root@uni.edu").await;
    assert_eq!(app.submissions("").await.len(), 1);
}

#[tokio::test]
async fn enumerations_are_published() {
    let app = TestApp::spawn().await;

    let courses = app.get("/api/courses").await.body;
    assert_eq!(
        courses,
        serde_json::json!(["CS101", "ENG202", "MATH150", "PHY210"])
    );

    let statuses = app.get("/api/statuses").await.body;
    assert_eq!(
        statuses,
        serde_json::json!(["Pending", "Reviewed", "Approved", "Rejected", "Needs Changes"])
    );
}
