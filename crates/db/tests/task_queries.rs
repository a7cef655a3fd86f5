//! Integration tests for the task store, filtered listing and dashboard.
//!
//! - CRUD scoped to the owner
//! - Filter composition (status, priority, category, search)
//! - Pagination totals and out-of-range pages
//! - Dashboard stats and recent activity

use chrono::NaiveDate;
use sqlx::PgPool;
use tasktrack_core::task::{build_filter_set, FilterParams, TaskFilter, TaskPriority, TaskStatus};
use tasktrack_db::models::category::CategoryFields;
use tasktrack_db::models::task::TaskFields;
use tasktrack_db::models::user::CreateUser;
use tasktrack_db::repositories::{CategoryRepo, DashboardRepo, TaskRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: email.to_string(),
            email: email.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_category(pool: &PgPool, user_id: i64, name: &str) -> i64 {
    CategoryRepo::create(
        pool,
        user_id,
        &CategoryFields {
            name: name.to_string(),
            color: "#3366ff".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn task(title: &str, status: TaskStatus, priority: TaskPriority) -> TaskFields {
    TaskFields {
        title: title.to_string(),
        description: None,
        status,
        priority,
        due_date: None,
        category_id: None,
    }
}

fn filter(
    status: Option<&str>,
    priority: Option<&str>,
    category: Option<&str>,
    search: Option<&str>,
) -> TaskFilter {
    build_filter_set(FilterParams {
        status,
        priority,
        category,
        search,
    })
    .unwrap()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_read_with_category(pool: PgPool) {
    let user = new_user(&pool, "alice@x.test").await;
    let work = new_category(&pool, user, "Work").await;

    let input = TaskFields {
        description: Some("Quarterly numbers".to_string()),
        due_date: NaiveDate::from_ymd_opt(2026, 11, 1),
        category_id: Some(work),
        ..task("Write report", TaskStatus::Pending, TaskPriority::High)
    };
    let created = TaskRepo::create(&pool, user, &input).await.unwrap();
    assert_eq!(created.user_id, user);
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.priority, TaskPriority::High);
    assert_eq!(created.due_date, NaiveDate::from_ymd_opt(2026, 11, 1));

    let shown = TaskRepo::find_with_category(&pool, user, created.id)
        .await
        .unwrap()
        .unwrap();
    let category = shown.category.expect("category should be resolved");
    assert_eq!(category.id, work);
    assert_eq!(category.name, "Work");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_full_replace(pool: PgPool) {
    let user = new_user(&pool, "alice@x.test").await;
    let work = new_category(&pool, user, "Work").await;
    let created = TaskRepo::create(
        &pool,
        user,
        &TaskFields {
            description: Some("draft".to_string()),
            category_id: Some(work),
            ..task("Write report", TaskStatus::Pending, TaskPriority::High)
        },
    )
    .await
    .unwrap();

    let updated = TaskRepo::update(
        &pool,
        user,
        created.id,
        &task("Write report", TaskStatus::Completed, TaskPriority::Low),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.priority, TaskPriority::Low);
    assert_eq!(updated.description, None);
    assert_eq!(updated.category_id, None);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_user_cannot_read_or_mutate(pool: PgPool) {
    let alice = new_user(&pool, "alice@x.test").await;
    let bob = new_user(&pool, "bob@x.test").await;
    let t = TaskRepo::create(&pool, alice, &task("a", TaskStatus::Pending, TaskPriority::Low))
        .await
        .unwrap();

    assert!(TaskRepo::find_with_category(&pool, bob, t.id)
        .await
        .unwrap()
        .is_none());
    assert!(TaskRepo::update(&pool, bob, t.id, &task("x", TaskStatus::Completed, TaskPriority::High))
        .await
        .unwrap()
        .is_none());
    assert!(!TaskRepo::delete(&pool, bob, t.id).await.unwrap());
    assert!(TaskRepo::delete(&pool, alice, t.id).await.unwrap());
    assert!(TaskRepo::find_by_id(&pool, t.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Filtered listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_is_owner_scoped_even_with_foreign_category(pool: PgPool) {
    let alice = new_user(&pool, "alice@x.test").await;
    let bob = new_user(&pool, "bob@x.test").await;
    let bobs_category = new_category(&pool, bob, "Secret").await;
    TaskRepo::create(
        &pool,
        bob,
        &TaskFields {
            category_id: Some(bobs_category),
            ..task("bob's", TaskStatus::Pending, TaskPriority::Low)
        },
    )
    .await
    .unwrap();
    TaskRepo::create(&pool, alice, &task("alice's", TaskStatus::Pending, TaskPriority::Low))
        .await
        .unwrap();

    let all = TaskRepo::list_filtered(&pool, alice, &TaskFilter::default(), 1)
        .await
        .unwrap();
    assert_eq!(all.meta.total, 1);
    assert_eq!(all.data[0].task.title, "alice's");

    let category = bobs_category.to_string();
    let foreign_page = TaskRepo::list_filtered(&pool, alice, &filter(None, None, Some(&category), None), 1)
        .await
        .unwrap();
    assert!(foreign_page.data.is_empty());
    assert_eq!(foreign_page.meta.total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_compose_and_search_is_case_insensitive(pool: PgPool) {
    let user = new_user(&pool, "alice@x.test").await;
    let work = new_category(&pool, user, "Work").await;

    let report = TaskRepo::create(
        &pool,
        user,
        &TaskFields {
            category_id: Some(work),
            ..task("Write Report", TaskStatus::Pending, TaskPriority::High)
        },
    )
    .await
    .unwrap();
    TaskRepo::create(
        &pool,
        user,
        &TaskFields {
            description: Some("attach the REPORT".to_string()),
            ..task("Email boss", TaskStatus::Completed, TaskPriority::High)
        },
    )
    .await
    .unwrap();
    TaskRepo::create(&pool, user, &task("Groceries", TaskStatus::Pending, TaskPriority::Low))
        .await
        .unwrap();

    let searched = TaskRepo::list_filtered(&pool, user, &filter(None, None, None, Some("report")), 1)
        .await
        .unwrap();
    assert_eq!(searched.meta.total, 2);

    let composed = TaskRepo::list_filtered(
        &pool,
        user,
        &filter(Some("pending"), Some("high"), None, Some("report")),
        1,
    )
    .await
    .unwrap();
    assert_eq!(composed.meta.total, 1);
    assert_eq!(composed.data[0].task.id, report.id);

    let by_category = work.to_string();
    let categorized =
        TaskRepo::list_filtered(&pool, user, &filter(None, None, Some(&by_category), None), 1)
            .await
            .unwrap();
    assert_eq!(categorized.meta.total, 1);
    assert_eq!(categorized.data[0].task.id, report.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    let user = new_user(&pool, "alice@x.test").await;
    TaskRepo::create(&pool, user, &task("100% done", TaskStatus::Pending, TaskPriority::Low))
        .await
        .unwrap();
    TaskRepo::create(&pool, user, &task("1000 things", TaskStatus::Pending, TaskPriority::Low))
        .await
        .unwrap();

    let page = TaskRepo::list_filtered(&pool, user, &filter(None, None, None, Some("0%")), 1)
        .await
        .unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].task.title, "100% done");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pagination_newest_first(pool: PgPool) {
    let user = new_user(&pool, "alice@x.test").await;
    let mut ids = Vec::new();
    for i in 0..23 {
        let t = TaskRepo::create(
            &pool,
            user,
            &task(&format!("task {i}"), TaskStatus::Pending, TaskPriority::Low),
        )
        .await
        .unwrap();
        ids.push(t.id);
    }

    let first = TaskRepo::list_filtered(&pool, user, &TaskFilter::default(), 1)
        .await
        .unwrap();
    assert_eq!(first.data.len(), 10);
    assert_eq!(first.data[0].task.id, *ids.last().unwrap());
    assert_eq!(first.meta.total, 23);
    assert_eq!(first.meta.last_page, 3);

    let mut seen = 0;
    for page in 1..=3 {
        let listed = TaskRepo::list_filtered(&pool, user, &TaskFilter::default(), page)
            .await
            .unwrap();
        for pair in listed.data.windows(2) {
            assert!(pair[0].task.created_at >= pair[1].task.created_at);
        }
        seen += listed.data.len();
    }
    assert_eq!(seen, 23);

    let beyond = TaskRepo::list_filtered(&pool, user, &TaskFilter::default(), 9)
        .await
        .unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.meta.total, 23);
    assert_eq!(beyond.meta.current_page, 9);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_partition_total(pool: PgPool) {
    let user = new_user(&pool, "alice@x.test").await;
    let other = new_user(&pool, "bob@x.test").await;
    let statuses = [
        TaskStatus::Pending,
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Completed,
        TaskStatus::Completed,
    ];
    for (i, status) in statuses.into_iter().enumerate() {
        TaskRepo::create(&pool, user, &task(&format!("t{i}"), status, TaskPriority::Low))
            .await
            .unwrap();
    }
    TaskRepo::create(&pool, other, &task("not mine", TaskStatus::Pending, TaskPriority::Low))
        .await
        .unwrap();

    let stats = DashboardRepo::compute_stats(&pool, user).await.unwrap();
    assert_eq!(stats.total, 6);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.completed, 3);
    assert_eq!(stats.pending + stats.in_progress + stats.completed, stats.total);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_dashboard(pool: PgPool) {
    let user = new_user(&pool, "alice@x.test").await;
    let summary = DashboardRepo::summary(&pool, user).await.unwrap();
    assert_eq!(summary.stats.total, 0);
    assert_eq!(summary.stats.pending, 0);
    assert!(summary.recent_tasks.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recent_tasks_limited_to_five(pool: PgPool) {
    let user = new_user(&pool, "alice@x.test").await;
    let mut last = 0;
    for i in 0..7 {
        last = TaskRepo::create(&pool, user, &task(&format!("t{i}"), TaskStatus::Pending, TaskPriority::Low))
            .await
            .unwrap()
            .id;
    }

    let summary = DashboardRepo::summary(&pool, user).await.unwrap();
    assert_eq!(summary.stats.total, 7);
    assert_eq!(summary.recent_tasks.len(), 5);
    assert_eq!(summary.recent_tasks[0].task.id, last);
}

/// One user, one category, one task: the walk-through from creating a
/// category to seeing the task on the dashboard.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_work_report_walkthrough(pool: PgPool) {
    let user = new_user(&pool, "alice@x.test").await;
    let work = new_category(&pool, user, "Work").await;
    let created = TaskRepo::create(
        &pool,
        user,
        &TaskFields {
            category_id: Some(work),
            ..task("Write report", TaskStatus::Pending, TaskPriority::High)
        },
    )
    .await
    .unwrap();

    let pending = TaskRepo::list_filtered(&pool, user, &filter(Some("pending"), None, None, None), 1)
        .await
        .unwrap();
    assert_eq!(pending.meta.total, 1);

    TaskRepo::update(
        &pool,
        user,
        created.id,
        &TaskFields {
            category_id: Some(work),
            ..task("Write report", TaskStatus::Completed, TaskPriority::High)
        },
    )
    .await
    .unwrap()
    .unwrap();

    let summary = DashboardRepo::summary(&pool, user).await.unwrap();
    assert_eq!(summary.stats.total, 1);
    assert_eq!(summary.stats.completed, 1);
    assert_eq!(summary.stats.pending, 0);
    assert_eq!(summary.recent_tasks[0].task.id, created.id);
    assert_eq!(
        summary.recent_tasks[0].category.as_ref().map(|c| c.name.as_str()),
        Some("Work")
    );

    let categories = CategoryRepo::list_with_task_counts(&pool, user).await.unwrap();
    assert_eq!(categories[0].tasks_count, 1);
}
