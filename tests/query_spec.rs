use chrono::{NaiveDate, TimeZone, Utc};
use project_dashboard::mock_data::seed_projects;
use project_dashboard::models::*;
use project_dashboard::query::*;
use speculate2::speculate;
use uuid::Uuid;

fn make_project(n: u32, name: &str, status: ProjectStatus) -> Project {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(n.into());
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Project {
        id: Uuid::from_u128(n.into()),
        name: name.to_string(),
        description: format!("Project number {}", n),
        status,
        start_date: start,
        end_date: start + chrono::Duration::days(30),
        progress: (n * 7 % 101) as u8,
        budget: f64::from(n) * 1000.0,
        tasks: vec![],
        created_at,
        updated_at: created_at,
    }
}

fn numbered(count: u32) -> Vec<Project> {
    (1..=count)
        .map(|n| make_project(n, &format!("Project {:02}", n), ProjectStatus::Planning))
        .collect()
}

fn names(view: &ProjectView) -> Vec<&str> {
    view.page.iter().map(|p| p.name.as_str()).collect()
}

speculate! {
    describe "pagination" {
        it "splits 15 projects into a full page and a partial page" {
            let projects = numbered(15);

            let first = compute_view(&projects, &Filters::default(), SortBy::default(), &Pagination::new(10));
            assert_eq!(first.page.len(), 10);
            assert_eq!(first.total_items, 15);
            assert_eq!(first.total_pages, 2);
            assert_eq!(first.page[0].name, "Project 01");

            let second_page = Pagination { current_page: 2, ..Pagination::new(10) };
            let second = compute_view(&projects, &Filters::default(), SortBy::default(), &second_page);
            assert_eq!(second.page.len(), 5);
            assert_eq!(second.page[0].name, "Project 11");
            assert_eq!(second.page[4].name, "Project 15");
        }

        it "reports zero pages for an empty collection" {
            let view = compute_view(&[], &Filters::default(), SortBy::default(), &Pagination::new(10));
            assert!(view.page.is_empty());
            assert_eq!(view.total_items, 0);
            assert_eq!(view.total_pages, 0);
        }

        it "returns an empty page past the end" {
            let projects = numbered(3);
            let past = Pagination { current_page: 5, ..Pagination::new(10) };
            let view = compute_view(&projects, &Filters::default(), SortBy::default(), &past);
            assert!(view.page.is_empty());
            assert_eq!(view.total_items, 3);
            assert_eq!(view.total_pages, 1);
        }

        it "computes total pages by ceiling division" {
            assert_eq!(total_pages(0, 10), 0);
            assert_eq!(total_pages(10, 10), 1);
            assert_eq!(total_pages(11, 10), 2);
            assert_eq!(total_pages(5, 0), 5);
        }
    }

    describe "search" {
        it "keeps only projects whose name or description contains the term" {
            let projects = seed_projects();
            let search = Filters { search: "MOBILE".to_string(), ..Filters::default() };

            let view = compute_view(&projects, &search, SortBy::default(), &Pagination::new(100));
            let expected = projects.iter().filter(|p| matches_search(p, "mobile")).count();

            assert_eq!(view.total_items, expected);
            for project in &view.page {
                let haystack = format!("{} {}", project.name, project.description).to_lowercase();
                assert!(haystack.contains("mobile"));
            }
        }

        it "matches nothing for an unknown term" {
            let search = Filters { search: "zzz-no-such-project".to_string(), ..Filters::default() };
            let view = compute_view(&seed_projects(), &search, SortBy::default(), &Pagination::new(10));
            assert_eq!(view.total_items, 0);
            assert_eq!(view.total_pages, 0);
        }
    }

    describe "status filter" {
        it "keeps only projects with the selected status" {
            let projects = vec![
                make_project(1, "Alpha", ProjectStatus::InProgress),
                make_project(2, "Beta", ProjectStatus::Completed),
                make_project(3, "Gamma", ProjectStatus::InProgress),
            ];
            let in_progress = Filters {
                status: FilterValue::Only(ProjectStatus::InProgress),
                ..Filters::default()
            };

            let view = compute_view(&projects, &in_progress, SortBy::default(), &Pagination::new(10));
            assert_eq!(names(&view), vec!["Alpha", "Gamma"]);
        }
    }

    describe "task filters" {
        it "keeps projects with at least one task of the priority" {
            let mut critical = make_project(1, "Critical work", ProjectStatus::Planning);
            critical.tasks.push(Task::new(critical.id, TaskInput {
                title: "Fix outage".to_string(),
                priority: TaskPriority::Critical,
                assigned_to: "dev@example.com".to_string(),
                ..TaskInput::default()
            }));
            let quiet = make_project(2, "Quiet work", ProjectStatus::Planning);
            let projects = vec![critical, quiet];

            let by_priority = Filters {
                priority: FilterValue::Only(TaskPriority::Critical),
                ..Filters::default()
            };
            let view = compute_view(&projects, &by_priority, SortBy::default(), &Pagination::new(10));
            assert_eq!(names(&view), vec!["Critical work"]);

            let by_assignee = Filters {
                assigned_user: "pm@example.com".to_string(),
                ..Filters::default()
            };
            let view = compute_view(&projects, &by_assignee, SortBy::default(), &Pagination::new(10));
            assert!(view.page.is_empty());
        }

        it "narrows a task list by priority and assignee" {
            let project_id = Uuid::new_v4();
            let task = |title: &str, priority, assignee: &str| Task::new(project_id, TaskInput {
                title: title.to_string(),
                priority,
                assigned_to: assignee.to_string(),
                ..TaskInput::default()
            });
            let tasks = vec![
                task("a", TaskPriority::High, "dev@example.com"),
                task("b", TaskPriority::Low, "dev@example.com"),
                task("c", TaskPriority::High, "pm@example.com"),
            ];

            let high = filter_tasks(&tasks, &FilterValue::Only(TaskPriority::High), "");
            assert_eq!(high.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);

            let dev_high = filter_tasks(&tasks, &FilterValue::Only(TaskPriority::High), "dev@example.com");
            assert_eq!(dev_high.len(), 1);
            assert_eq!(filter_tasks(&tasks, &FilterValue::All, "").len(), 3);
        }
    }

    describe "sorting" {
        it "reverses the order when the direction flips" {
            let projects = numbered(8);
            let all = Pagination::new(100);
            for field in [SortField::Name, SortField::Budget, SortField::StartDate, SortField::Progress] {
                let asc = compute_view(&projects, &Filters::default(), SortBy::new(field, SortOrder::Asc), &all);
                let desc = compute_view(&projects, &Filters::default(), SortBy::new(field, SortOrder::Desc), &all);

                let mut reversed = desc.page.clone();
                reversed.reverse();
                assert_eq!(asc.page, reversed, "field {}", field.as_str());
            }
        }

        it "orders names case-insensitively" {
            let projects = vec![
                make_project(1, "beta", ProjectStatus::Planning),
                make_project(2, "Alpha", ProjectStatus::Planning),
                make_project(3, "Gamma", ProjectStatus::Planning),
            ];
            let view = compute_view(&projects, &Filters::default(), SortBy::default(), &Pagination::new(10));
            assert_eq!(names(&view), vec!["Alpha", "beta", "Gamma"]);
        }

        it "orders budgets numerically" {
            let mut projects = numbered(3);
            projects[0].budget = 90_000.0;
            projects[1].budget = 100_000.0;
            projects[2].budget = 5_000.0;

            let by_budget = SortBy::new(SortField::Budget, SortOrder::Desc);
            let view = compute_view(&projects, &Filters::default(), by_budget, &Pagination::new(10));
            let budgets: Vec<f64> = view.page.iter().map(|p| p.budget).collect();
            assert_eq!(budgets, vec![100_000.0, 90_000.0, 5_000.0]);
        }

        it "keeps a total order when a budget is NaN" {
            let mut projects = numbered(5);
            projects[0].budget = f64::NAN;
            projects[3].budget = f64::NAN;

            let by_budget = SortBy::new(SortField::Budget, SortOrder::Asc);
            let view = compute_view(&projects, &Filters::default(), by_budget, &Pagination::new(10));
            let budgets: Vec<f64> = view.page.iter().map(|p| p.budget).collect();
            assert_eq!(budgets[..3], [2000.0, 3000.0, 5000.0]);
            assert!(budgets[3..].iter().all(|b| b.is_nan()));

            let charts = compute_chart_data(&projects);
            assert!(charts.top_budget[0].value.is_nan());
            assert_eq!(charts.top_budget[2].value, 5.0);
        }

        it "leaves the order unchanged when sorting by tasks" {
            let projects = vec![
                make_project(1, "Zulu", ProjectStatus::Planning),
                make_project(2, "Alpha", ProjectStatus::Planning),
            ];
            let by_tasks = SortBy::new(SortField::Tasks, SortOrder::Asc);
            let view = compute_view(&projects, &Filters::default(), by_tasks, &Pagination::new(10));
            assert_eq!(names(&view), vec!["Zulu", "Alpha"]);
        }
    }

    describe "purity" {
        it "returns the same view for the same inputs" {
            let projects = seed_projects();
            let query = QueryState {
                filters: Filters { search: "a".to_string(), ..Filters::default() },
                sort_by: SortBy::new(SortField::Progress, SortOrder::Desc),
                ..QueryState::default()
            };

            let first = compute_view_for(&projects, &query);
            let second = compute_view_for(&projects, &query);
            assert_eq!(first, second);
            assert_eq!(projects, seed_projects());
        }
    }

    describe "stats" {
        it "counts over the unfiltered collection" {
            let projects = vec![
                make_project(1, "A", ProjectStatus::InProgress),
                make_project(2, "B", ProjectStatus::Completed),
                make_project(3, "C", ProjectStatus::Completed),
            ];
            let stats = compute_stats(&projects);
            assert_eq!(stats.total, 3);
            assert_eq!(stats.in_progress, 1);
            assert_eq!(stats.completed, 2);
            assert_eq!(stats.total_budget, 6000.0);
        }

        it "builds chart series" {
            let mut projects = numbered(12);
            projects[0].name = "An exceptionally long project name".to_string();
            projects[0].budget = 1_000_000.0;

            let charts = compute_chart_data(&projects);
            assert_eq!(charts.top_progress.len(), 10);
            assert_eq!(charts.top_budget.len(), 5);
            assert_eq!(charts.top_budget[0].value, 1000.0);
            assert_eq!(charts.top_budget[0].name, "An exceptionall...");
            assert_eq!(charts.status_distribution.len(), 1);
            assert_eq!(charts.status_distribution[0].count, 12);
        }
    }
}
