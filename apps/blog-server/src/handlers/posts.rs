//! Post handlers - listing, reading, writing, editing and deleting posts.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Local;

use blog_core::domain::{BlogPost, NewBlogPost, PostDraft};
use blog_core::error::{DomainError, RepoError};
use blog_shared::validation::FORM;
use blog_shared::{FieldErrors, FlashMessage, ListQuery, PostForm};

use super::{redirect, redirect_with_flash};
use crate::middleware::csrf::{self, CSRF_ERROR};
use crate::middleware::error::AppResult;
use crate::middleware::flash::IncomingFlash;
use crate::state::AppState;
use crate::templates::{IndexTemplate, PostFormTemplate, PostTemplate, render, render_with_cookies};

/// Which form page is being rendered.
#[derive(Debug, Clone, Copy)]
enum FormMode {
    Create,
    Edit(i32),
}

impl FormMode {
    fn action(self) -> String {
        match self {
            FormMode::Create => "/create-post".to_string(),
            FormMode::Edit(id) => format!("/edit-post/{}", id),
        }
    }
}

/// GET /?page=N
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let request = query.page_request();
    let page = state.posts.list_page(request).await?;

    tracing::debug!(
        page = page.page,
        total_pages = page.total_pages,
        shown = page.items.len(),
        "Listing posts"
    );

    render(&IndexTemplate {
        page: &page,
        flashes: flash.messages(),
    })
}

/// GET /post/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, path.into_inner()).await?;

    render(&PostTemplate {
        post: &post,
        flashes: flash.messages(),
    })
}

/// GET /create-post
pub async fn new_post_form(
    state: web::Data<AppState>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    render_form(
        &state,
        &PostForm::default(),
        &FieldErrors::new(),
        FormMode::Create,
        flash.messages(),
    )
}

/// POST /create-post
pub async fn create_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<PostForm>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let draft = match check_submission(&req, &state, &form) {
        Ok(draft) => draft,
        Err(errors) => {
            tracing::debug!(%errors, "Post form rejected");
            return render_form(&state, &form, &errors, FormMode::Create, flash.messages());
        }
    };

    let post = NewBlogPost::publish(draft, Local::now().date_naive());

    match state.posts.insert(post).await {
        Ok(created) => {
            tracing::info!(post_id = created.id, title = %created.title, "Post created");
            Ok(redirect_with_flash(
                "/",
                FlashMessage::success("Blog added successfully"),
            ))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create post");
            let flashes = flash.with(FlashMessage::danger(format!("Error message: {}", e)));
            render_form(&state, &form, &FieldErrors::new(), FormMode::Create, &flashes)
        }
    }
}

/// GET /edit-post/{id}
pub async fn edit_post_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = load_post(&state, id).await?;

    render_form(
        &state,
        &PostForm::from_post(&post),
        &FieldErrors::new(),
        FormMode::Edit(id),
        flash.messages(),
    )
}

/// POST /edit-post/{id}
pub async fn update_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<PostForm>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    load_post(&state, id).await?;

    let form = form.into_inner();

    let draft = match check_submission(&req, &state, &form) {
        Ok(draft) => draft,
        Err(errors) => {
            tracing::debug!(post_id = id, %errors, "Post form rejected");
            return render_form(&state, &form, &errors, FormMode::Edit(id), flash.messages());
        }
    };

    match state.posts.update(id, draft).await {
        Ok(updated) => {
            tracing::info!(post_id = updated.id, "Post updated");
            Ok(redirect_with_flash(
                "/",
                FlashMessage::success("Post updated successfully"),
            ))
        }
        // deleted since the lookup above
        Err(RepoError::NotFound) => Err(DomainError::post_not_found(id).into()),
        Err(e) => {
            tracing::warn!(post_id = id, error = %e, "Failed to update post");
            let flashes = flash.with(FlashMessage::danger(format!("Error occurred: {}", e)));
            render_form(&state, &form, &FieldErrors::new(), FormMode::Edit(id), &flashes)
        }
    }
}

/// GET /delete/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await.map_err(|e| match e {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => other.into(),
    })?;

    tracing::info!(post_id = id, "Post deleted");
    Ok(redirect("/"))
}

async fn load_post(state: &AppState, id: i32) -> AppResult<BlogPost> {
    let post = state.posts.find_by_id(id).await?;
    post.ok_or_else(|| DomainError::post_not_found(id).into())
}

/// Run the field rules and the anti-forgery check together so that every
/// problem is reported at once.
fn check_submission(
    req: &HttpRequest,
    state: &AppState,
    form: &PostForm,
) -> Result<PostDraft, FieldErrors> {
    let verified = csrf::verify_request(req, state.csrf.as_ref(), &form.csrf_token);

    match form.validate_draft() {
        Ok(draft) if verified => Ok(draft),
        result => {
            let mut errors = result.err().unwrap_or_default();
            if !verified {
                errors.add(FORM, CSRF_ERROR);
            }
            Err(errors)
        }
    }
}

/// Render the create/edit page with a freshly issued anti-forgery token.
fn render_form(
    state: &AppState,
    form: &PostForm,
    errors: &FieldErrors,
    mode: FormMode,
    flashes: &[FlashMessage],
) -> AppResult<HttpResponse> {
    let token = state.csrf.issue();
    let action = mode.action();

    let page = PostFormTemplate {
        form,
        errors,
        csrf_token: &token.token,
        is_edit: matches!(mode, FormMode::Edit(_)),
        action: &action,
        flashes,
    };

    render_with_cookies(&page, vec![csrf::nonce_cookie(&token)])
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::{StatusCode, header};
    use actix_web::test::{self, TestRequest};
    use actix_web::{App, web};
    use chrono::NaiveDate;

    use blog_core::domain::{NewBlogPost, PostDraft, publish_date};
    use blog_shared::{FlashLevel, PostForm, flash};

    use crate::handlers::configure_routes;
    use crate::middleware::csrf::{CSRF_COOKIE, nonce_cookie};
    use crate::middleware::flash::{FLASH_COOKIE, flash_cookie};
    use crate::state::AppState;

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn hello_form() -> PostForm {
        PostForm {
            title: "Hello".into(),
            subtitle: "World".into(),
            author: "A".into(),
            img_url: "https://x.com/i.png".into(),
            body: "<p>hi</p>".into(),
            csrf_token: String::new(),
        }
    }

    /// A form submission carrying a valid anti-forgery pair.
    fn submit(state: &AppState, uri: &str, form: &PostForm) -> TestRequest {
        let token = state.csrf.issue();
        let form = PostForm {
            csrf_token: token.token.clone(),
            ..form.clone()
        };
        TestRequest::post()
            .uri(uri)
            .cookie(nonce_cookie(&token))
            .set_form(form)
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.into(),
            subtitle: "sub".into(),
            author: "A".into(),
            img_url: "https://x.com/i.png".into(),
            body: "<p>body</p>".into(),
        }
    }

    async fn seed(state: &AppState, title: &str) -> i32 {
        seed_on(state, draft(title), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()).await
    }

    async fn seed_on(state: &AppState, draft: PostDraft, day: NaiveDate) -> i32 {
        state
            .posts
            .insert(NewBlogPost::publish(draft, day))
            .await
            .unwrap()
            .id
    }

    fn flashed(resp: &actix_web::dev::ServiceResponse) -> Vec<blog_shared::FlashMessage> {
        resp.response()
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .map(|c| flash::decode(c.value()))
            .unwrap_or_default()
    }

    async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
        let bytes = test::read_body(resp).await;
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn create_stores_post_and_redirects_home() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);

        let resp = test::call_service(&app, submit(&state, "/create-post", &hello_form()).to_request())
            .await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
        let messages = flashed(&resp);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, FlashLevel::Success);
        assert_eq!(messages[0].text, "Blog added successfully");

        let page = state.posts.list_page(Default::default()).await.unwrap();
        assert_eq!(page.total_items, 1);
        let post = &page.items[0];
        assert_eq!(post.title, "Hello");
        assert_eq!(post.subtitle, "World");
        assert_eq!(post.author, "A");
        assert_eq!(post.img_url, "https://x.com/i.png");
        assert_eq!(post.body, "<p>hi</p>");
        assert_eq!(post.date, publish_date(chrono::Local::now().date_naive()));

        let listing = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(listing.status(), StatusCode::OK);
        assert!(body_text(listing).await.contains("Hello"));
    }

    #[actix_web::test]
    async fn duplicate_title_is_reported_not_stored() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);

        let first =
            test::call_service(&app, submit(&state, "/create-post", &hello_form()).to_request()).await;
        assert_eq!(first.status(), StatusCode::SEE_OTHER);

        let second =
            test::call_service(&app, submit(&state, "/create-post", &hello_form()).to_request()).await;

        assert_eq!(second.status(), StatusCode::OK);
        let body = body_text(second).await;
        assert!(body.contains("alert-danger"));
        assert!(body.contains("Error message: "));
        assert_eq!(state.posts.count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn invalid_fields_redisplay_form() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        let form = PostForm {
            title: "   ".into(),
            img_url: "not a url".into(),
            ..hello_form()
        };

        let resp = test::call_service(&app, submit(&state, "/create-post", &form).to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.response().cookies().any(|c| c.name() == CSRF_COOKIE));
        let body = body_text(resp).await;
        assert!(body.contains("This field is required."));
        assert!(body.contains("Invalid URL."));
        // submitted values are kept
        assert!(body.contains("value=\"World\""));
        assert_eq!(state.posts.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn submission_without_valid_token_is_rejected() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);

        let no_cookie = TestRequest::post()
            .uri("/create-post")
            .set_form(PostForm {
                csrf_token: "deadbeef".into(),
                ..hello_form()
            })
            .to_request();
        let resp = test::call_service(&app, no_cookie).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("The CSRF token is missing or invalid."));

        let token = state.csrf.issue();
        let wrong_nonce = TestRequest::post()
            .uri("/create-post")
            .cookie(Cookie::new(CSRF_COOKIE, "another-nonce"))
            .set_form(PostForm {
                csrf_token: token.token,
                ..hello_form()
            })
            .to_request();
        let resp = test::call_service(&app, wrong_nonce).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("The CSRF token is missing or invalid."));

        assert_eq!(state.posts.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn unreadable_form_gets_html_error_page() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);

        let wrong_type = TestRequest::post()
            .uri("/create-post")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(r#"{"title":"Hello"}"#)
            .to_request();
        let resp = test::call_service(&app, wrong_type).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );

        let oversized = TestRequest::post()
            .uri("/create-post")
            .set_form(PostForm {
                body: "x".repeat(2 << 20),
                ..hello_form()
            })
            .to_request();
        let resp = test::call_service(&app, oversized).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body_text(resp).await.contains("Payload Too Large"));

        assert_eq!(state.posts.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn unknown_post_is_404_everywhere() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);

        for uri in ["/post/9999", "/edit-post/9999", "/delete/9999", "/post/abc", "/nowhere"] {
            let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {}", uri);
        }

        let resp =
            test::call_service(&app, submit(&state, "/edit-post/9999", &hello_form()).to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.posts.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn show_escapes_fields_but_not_body() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        let id = seed(&state, "<b>Bold</b> claims").await;

        let resp =
            test::call_service(&app, TestRequest::get().uri(&format!("/post/{}", id)).to_request())
                .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("&lt;b&gt;Bold"));
        assert!(!body.contains("<b>Bold"));
        assert!(body.contains("<p>body</p>"));
        assert!(body.contains("January 01, 20"));
    }

    #[actix_web::test]
    async fn show_keeps_image_url_inside_its_attribute() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        let styled = PostDraft {
            img_url: "https://x.com/a.png');background:red;('".into(),
            ..draft("Styled")
        };
        let id = seed_on(&state, styled, NaiveDate::from_ymd_opt(2024, 4, 5).unwrap()).await;

        let resp =
            test::call_service(&app, TestRequest::get().uri(&format!("/post/{}", id)).to_request())
                .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(!body.contains("url("));
        assert!(!body.contains("');background"));
        assert!(body.contains("<img"));
    }

    #[actix_web::test]
    async fn edit_form_is_prefilled() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        let id = seed(&state, "Draft title").await;

        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri(&format!("/edit-post/{}", id))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.response().cookies().any(|c| c.name() == CSRF_COOKIE));
        let body = body_text(resp).await;
        assert!(body.contains("value=\"Draft title\""));
        assert!(body.contains("Edit Post"));
    }

    #[actix_web::test]
    async fn edit_changes_fields_but_keeps_id_and_date() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        let id = seed(&state, "Before").await;
        let form = PostForm {
            title: "After".into(),
            ..hello_form()
        };

        let resp = test::call_service(
            &app,
            submit(&state, &format!("/edit-post/{}", id), &form).to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(flashed(&resp)[0].text, "Post updated successfully");

        let post = state.posts.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.id, id);
        assert_eq!(post.title, "After");
        assert_eq!(post.subtitle, "World");
        assert_eq!(post.body, "<p>hi</p>");
        assert_eq!(post.date, "January 01, 20");
    }

    #[actix_web::test]
    async fn edit_to_taken_title_is_reported() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        seed(&state, "Taken").await;
        let id = seed(&state, "Mine").await;
        let form = PostForm {
            title: "Taken".into(),
            ..hello_form()
        };

        let resp = test::call_service(
            &app,
            submit(&state, &format!("/edit-post/{}", id), &form).to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Error occurred: "));
        let post = state.posts.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.title, "Mine");
    }

    #[actix_web::test]
    async fn deleted_post_is_gone() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        let id = seed(&state, "Short lived").await;

        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri(&format!("/delete/{}", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        for uri in [
            format!("/post/{}", id),
            format!("/edit-post/{}", id),
            format!("/delete/{}", id),
        ] {
            let resp = test::call_service(&app, TestRequest::get().uri(&uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {}", uri);
        }
    }

    #[actix_web::test]
    async fn listing_shows_five_newest_per_page() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        for title in ["Entry A", "Entry B", "Entry C", "Entry D", "Entry E", "Entry F", "Entry G"] {
            seed(&state, title).await;
        }

        let first = body_text(
            test::call_service(&app, TestRequest::get().uri("/").to_request()).await,
        )
        .await;
        for title in ["Entry G", "Entry F", "Entry E", "Entry D", "Entry C"] {
            assert!(first.contains(title), "page 1 misses {}", title);
        }
        assert!(!first.contains("Entry B"));
        assert!(first.contains("href=\"/?page=2\""));

        let second = body_text(
            test::call_service(&app, TestRequest::get().uri("/?page=2").to_request()).await,
        )
        .await;
        assert!(second.contains("Entry B"));
        assert!(second.contains("Entry A"));
        assert!(!second.contains("Entry C"));

        for uri in ["/?page=9", "/?page=9223372036854775807"] {
            let past_end = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(past_end.status(), StatusCode::OK, "GET {}", uri);
            assert!(!body_text(past_end).await.contains("Entry"), "GET {}", uri);
        }

        let garbage = body_text(
            test::call_service(&app, TestRequest::get().uri("/?page=abc").to_request()).await,
        )
        .await;
        assert!(garbage.contains("Entry G"));
    }

    #[actix_web::test]
    async fn listing_puts_later_dates_first() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        // inserted out of date order so id order disagrees with date order
        for (title, day) in [("Late entry", 20), ("Early entry", 1), ("Middle entry", 10)] {
            let date = NaiveDate::from_ymd_opt(2024, 4, day).unwrap();
            seed_on(&state, draft(title), date).await;
        }

        let body = body_text(
            test::call_service(&app, TestRequest::get().uri("/").to_request()).await,
        )
        .await;

        let late = body.find("Late entry").unwrap();
        let middle = body.find("Middle entry").unwrap();
        let early = body.find("Early entry").unwrap();
        assert!(late < middle, "April 20 should precede April 10");
        assert!(middle < early, "April 10 should precede April 01");
    }

    #[actix_web::test]
    async fn flash_is_shown_once_then_cleared() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);
        let message = blog_shared::FlashMessage::success("Post updated successfully");

        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri("/")
                .cookie(flash_cookie(&[message]))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let removal = resp
            .response()
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .unwrap();
        assert_eq!(removal.value(), "");
        assert!(body_text(resp).await.contains("Post updated successfully"));
    }

    #[actix_web::test]
    async fn static_pages_and_health_respond() {
        let state = AppState::in_memory().await;
        let app = test_app!(state);

        for uri in ["/about", "/contact", "/create-post"] {
            let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK, "GET {}", uri);
        }

        let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
    }
}
