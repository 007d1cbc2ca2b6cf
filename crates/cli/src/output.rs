//! Table rows for CLI output

use pubhub_sdk::{
    FormSubmission, HtmlPage, PublisherPost, PublisherTask, QrCode, ShortLink, SocialAccount,
    Variable, Workspace,
};
use std::fmt::Display;
use tabled::{Table, Tabled};

fn opt<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_table<R: Tabled>(rows: Vec<R>) {
    if rows.is_empty() {
        println!("(no results)");
        return;
    }
    println!("{}", Table::new(rows));
}

#[derive(Tabled)]
pub struct QrRow {
    id: String,
    name: String,
    content: String,
    scans: String,
    image: String,
}

impl From<QrCode> for QrRow {
    fn from(qr: QrCode) -> Self {
        Self {
            scans: opt(&qr.scan_count),
            image: opt(&qr.image_url),
            id: qr.id,
            name: qr.name,
            content: qr.content,
        }
    }
}

#[derive(Tabled)]
pub struct LinkRow {
    id: String,
    short_url: String,
    destination: String,
    clicks: String,
}

impl From<ShortLink> for LinkRow {
    fn from(link: ShortLink) -> Self {
        Self {
            short_url: opt(&link.short_url),
            clicks: opt(&link.click_count),
            id: link.id,
            destination: link.destination_url,
        }
    }
}

#[derive(Tabled)]
pub struct PageRow {
    id: String,
    name: String,
    url: String,
    size: String,
}

impl From<HtmlPage> for PageRow {
    fn from(page: HtmlPage) -> Self {
        Self {
            url: opt(&page.url),
            size: opt(&page.size_bytes),
            id: page.id,
            name: page.name,
        }
    }
}

#[derive(Tabled)]
pub struct SubmissionRow {
    id: String,
    submitted_at: String,
    fields: String,
}

impl From<FormSubmission> for SubmissionRow {
    fn from(submission: FormSubmission) -> Self {
        let fields = submission
            .data
            .iter()
            .map(|(k, v)| match v.as_str() {
                Some(s) => format!("{k}={s}"),
                None => format!("{k}={v}"),
            })
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            submitted_at: opt(&submission.submitted_at),
            id: submission.id,
            fields,
        }
    }
}

#[derive(Tabled)]
pub struct VariableRow {
    key: String,
    value: String,
    updated_at: String,
}

impl From<Variable> for VariableRow {
    fn from(variable: Variable) -> Self {
        Self {
            updated_at: opt(&variable.updated_at),
            key: variable.key,
            value: variable.value,
        }
    }
}

#[derive(Tabled)]
pub struct WorkspaceRow {
    id: String,
    name: String,
    accounts: String,
}

impl From<Workspace> for WorkspaceRow {
    fn from(workspace: Workspace) -> Self {
        Self {
            accounts: opt(&workspace.account_count),
            id: workspace.id,
            name: workspace.name,
        }
    }
}

#[derive(Tabled)]
pub struct AccountRow {
    id: String,
    platform: String,
    username: String,
}

impl From<SocialAccount> for AccountRow {
    fn from(account: SocialAccount) -> Self {
        Self {
            id: account.id,
            platform: account.platform.to_string(),
            username: account.username,
        }
    }
}

#[derive(Tabled)]
pub struct TaskRow {
    id: String,
    status: String,
    source: String,
    scheduled_at: String,
    posts: usize,
}

impl From<PublisherTask> for TaskRow {
    fn from(task: PublisherTask) -> Self {
        Self {
            status: task.status.to_string(),
            source: task.source_type.to_string(),
            scheduled_at: opt(&task.scheduled_at),
            posts: task.posts.len(),
            id: task.id,
        }
    }
}

#[derive(Tabled)]
pub struct PostRow {
    id: String,
    platform: String,
    status: String,
    url: String,
}

impl From<PublisherPost> for PostRow {
    fn from(post: PublisherPost) -> Self {
        Self {
            platform: post.platform.to_string(),
            status: post.status.to_string(),
            url: opt(&post.platform_url),
            id: post.id,
        }
    }
}
