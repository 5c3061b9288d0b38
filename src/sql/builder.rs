//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the projects, members and users tables.

use super::params::BindValue;

/// Static description of one table: identifiers here are the only ones that ever reach SQL text.
#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub key: &'static str,
    /// Every selectable column, key first.
    pub columns: &'static [&'static str],
    /// Columns written by create/update, in bind order.
    pub mutable: &'static [&'static str],
}

pub static PROJECTS: Table = Table {
    name: "projects",
    key: "projectID",
    columns: &[
        "projectID",
        "projectName",
        "projectDescription",
        "projectImage",
        "projectDeadline",
    ],
    mutable: &[
        "projectName",
        "projectDescription",
        "projectImage",
        "projectDeadline",
    ],
};

pub static MEMBERS: Table = Table {
    name: "members",
    key: "memberID",
    columns: &["memberID", "userID", "projectID"],
    mutable: &["userID", "projectID"],
};

pub static USERS: Table = Table {
    name: "users",
    key: "userID",
    columns: &["userID", "firstName", "lastName"],
    mutable: &[],
};

/// Quote identifier for SQLite (safe: only from the table constants).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn qualified(table: &str, column: &str) -> String {
    format!("{}.{}", quoted(table), quoted(column))
}

/// A statement ready to execute. `key` is the row id the statement targets, when it has one.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<BindValue>,
    pub key: Option<i64>,
}

impl Statement {
    fn new() -> Self {
        Statement {
            sql: String::new(),
            params: Vec::new(),
            key: None,
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// A row that can be written: values line up with its table's `mutable` columns.
pub trait Record {
    fn table() -> &'static Table;
    fn values(&self) -> Vec<BindValue>;
}

fn column_list(table: &Table) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every column by primary key.
pub fn select_by_key(table: &Table, id: i64) -> Statement {
    let mut q = Statement::new();
    let n = q.push_param(BindValue::Int(id));
    q.key = Some(id);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        column_list(table),
        quoted(table.name),
        quoted(table.key),
        n
    );
    q
}

/// SELECT `target` rows reachable from `link.link_column = id`, joined on `link.target_key = target.key`.
pub fn select_joined(link: &Table, link_column: &str, target: &Table, id: i64) -> Statement {
    let mut q = Statement::new();
    let n = q.push_param(BindValue::Int(id));
    q.key = Some(id);
    let cols = target
        .columns
        .iter()
        .map(|c| format!("{} AS {}", qualified(target.name, c), quoted(c)))
        .collect::<Vec<_>>()
        .join(", ");
    q.sql = format!(
        "SELECT {} FROM {} INNER JOIN {} ON {} = {} WHERE {} = ${} ORDER BY {}",
        cols,
        quoted(link.name),
        quoted(target.name),
        qualified(link.name, target.key),
        qualified(target.name, target.key),
        qualified(link.name, link_column),
        n,
        qualified(target.name, target.key)
    );
    q
}

/// INSERT the record's mutable columns.
pub fn insert<R: Record>(record: &R) -> Statement {
    let table = R::table();
    let mut q = Statement::new();
    let placeholders: Vec<String> = record
        .values()
        .into_iter()
        .map(|v| format!("${}", q.push_param(v)))
        .collect();
    let cols: Vec<String> = table.mutable.iter().map(|c| quoted(c)).collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(table.name),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE every mutable column of the row with primary key `id`.
pub fn update<R: Record>(record: &R, id: i64) -> Statement {
    let table = R::table();
    let mut q = Statement::new();
    let sets: Vec<String> = table
        .mutable
        .iter()
        .zip(record.values())
        .map(|(c, v)| format!("{} = ${}", quoted(c), q.push_param(v)))
        .collect();
    let n = q.push_param(BindValue::Int(id));
    q.key = Some(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(table.name),
        sets.join(", "),
        quoted(table.key),
        n
    );
    q
}

/// DELETE by primary key.
pub fn delete_by_key(table: &Table, id: i64) -> Statement {
    delete_where(table, table.key, id)
}

/// DELETE every row whose `column` equals `id`.
pub fn delete_where(table: &Table, column: &str, id: i64) -> Statement {
    let mut q = Statement::new();
    let n = q.push_param(BindValue::Int(id));
    q.key = Some(id);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quoted(table.name),
        qualified(table.name, column),
        n
    );
    q
}

pub fn projects_read(id: i64) -> Statement {
    select_by_key(&PROJECTS, id)
}

pub fn user_projects_read(user_id: i64) -> Statement {
    select_joined(&MEMBERS, "userID", &PROJECTS, user_id)
}

pub fn members_read(id: i64) -> Statement {
    select_by_key(&MEMBERS, id)
}

pub fn users_read(id: i64) -> Statement {
    select_by_key(&USERS, id)
}

pub fn projects_delete(id: i64) -> Statement {
    delete_by_key(&PROJECTS, id)
}

pub fn project_members_delete(project_id: i64) -> Statement {
    delete_where(&MEMBERS, "projectID", project_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(i64, Option<String>);

    impl Record for Pair {
        fn table() -> &'static Table {
            &MEMBERS
        }
        fn values(&self) -> Vec<BindValue> {
            vec![self.0.into(), self.1.clone().into()]
        }
    }

    #[test]
    fn select_by_key_binds_id() {
        let q = projects_read(42);
        assert_eq!(
            q.sql,
            "SELECT \"projectID\", \"projectName\", \"projectDescription\", \"projectImage\", \"projectDeadline\" FROM \"projects\" WHERE \"projectID\" = $1"
        );
        assert_eq!(q.params, vec![BindValue::Int(42)]);
        assert_eq!(q.key, Some(42));
    }

    #[test]
    fn joined_read_filters_on_link_table() {
        let q = user_projects_read(7);
        assert!(q.sql.starts_with("SELECT \"projects\".\"projectID\" AS \"projectID\", "));
        assert!(q.sql.contains(
            "FROM \"members\" INNER JOIN \"projects\" ON \"members\".\"projectID\" = \"projects\".\"projectID\""
        ));
        assert!(q.sql.ends_with("WHERE \"members\".\"userID\" = $1 ORDER BY \"projects\".\"projectID\""));
        assert_eq!(q.params, vec![BindValue::Int(7)]);
    }

    #[test]
    fn insert_uses_placeholders_for_every_value() {
        let q = insert(&Pair(3, Some("'; DROP TABLE members; --".into())));
        assert_eq!(q.sql, "INSERT INTO \"members\" (\"userID\", \"projectID\") VALUES ($1, $2)");
        assert_eq!(
            q.params,
            vec![BindValue::Int(3), BindValue::Text("'; DROP TABLE members; --".into())]
        );
        assert_eq!(q.key, None);
    }

    #[test]
    fn update_puts_id_last() {
        let q = update(&Pair(1, None), 9);
        assert_eq!(
            q.sql,
            "UPDATE \"members\" SET \"userID\" = $1, \"projectID\" = $2 WHERE \"memberID\" = $3"
        );
        assert_eq!(q.params, vec![BindValue::Int(1), BindValue::Null, BindValue::Int(9)]);
        assert_eq!(q.key, Some(9));
    }

    #[test]
    fn member_cascade_targets_project_column() {
        let q = project_members_delete(5);
        assert_eq!(q.sql, "DELETE FROM \"members\" WHERE \"members\".\"projectID\" = $1");
        assert_eq!(projects_delete(5).sql, "DELETE FROM \"projects\" WHERE \"projects\".\"projectID\" = $1");
    }

    #[test]
    fn builders_are_deterministic() {
        assert_eq!(user_projects_read(3), user_projects_read(3));
        assert_eq!(users_read(1).sql, "SELECT \"userID\", \"firstName\", \"lastName\" FROM \"users\" WHERE \"userID\" = $1");
        assert_eq!(members_read(2).params, vec![BindValue::Int(2)]);
    }
}
