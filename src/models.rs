//! Rows read back from the database and the records written to it.
//! Field names on the wire and in the schema are camelCase with an upper-case `ID` suffix.

use crate::sql::{BindValue, Record, Table, MEMBERS, PROJECTS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "projectID")]
    #[sqlx(rename = "projectID")]
    pub project_id: i64,
    pub project_name: String,
    pub project_description: String,
    pub project_image: Option<String>,
    pub project_deadline: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    #[serde(rename = "memberID")]
    #[sqlx(rename = "memberID")]
    pub member_id: i64,
    #[serde(rename = "userID")]
    #[sqlx(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "projectID")]
    #[sqlx(rename = "projectID")]
    pub project_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userID")]
    #[sqlx(rename = "userID")]
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Client-supplied project fields, used by both create and full-replace update.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub project_name: String,
    pub project_description: String,
    #[serde(default)]
    pub project_image: Option<String>,
    #[serde(default)]
    pub project_deadline: Option<NaiveDate>,
}

impl Record for ProjectRecord {
    fn table() -> &'static Table {
        &PROJECTS
    }

    fn values(&self) -> Vec<BindValue> {
        vec![
            self.project_name.clone().into(),
            self.project_description.clone().into(),
            self.project_image.clone().into(),
            self.project_deadline.into(),
        ]
    }
}

/// Link between a user and a project.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberRecord {
    pub user_id: i64,
    pub project_id: i64,
}

impl Record for MemberRecord {
    fn table() -> &'static Table {
        &MEMBERS
    }

    fn values(&self) -> Vec<BindValue> {
        vec![self.user_id.into(), self.project_id.into()]
    }
}
