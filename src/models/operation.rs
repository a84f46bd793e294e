//! Operation descriptors for one smoke-test iteration
//!
//! Every iteration creates a repository, opens an issue in it, commits a
//! file, and deletes the repository again. The steps are declared here as
//! data so adding coverage means adding a variant.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Prefix of every synthetic repository name
pub const SUBJECT_PREFIX: &str = "smoketest_repo";

/// Title used for the issue created in each subject
pub const ISSUE_TITLE: &str = "This is a test issue";

/// Path of the file committed to each subject
pub const TEST_FILE_PATH: &str = "testfile";

/// Raw contents of the committed file
pub const TEST_FILE_CONTENT: &str = "foo\n";

/// HTTP verbs used by the smoke test
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthetic repository exercised by one iteration
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestSubject {
    pub index: u32,
    pub name: String,
}

impl TestSubject {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            name: format!("{SUBJECT_PREFIX}{index}"),
        }
    }

    /// Subjects for a run of `iterations`, in execution order
    pub fn sequence(iterations: u32) -> impl Iterator<Item = TestSubject> {
        (1..=iterations).map(TestSubject::new)
    }
}

impl fmt::Display for TestSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The four steps of an iteration, in the order they run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    CreateRepo,
    CreateIssue,
    CreateFile,
    DeleteRepo,
}

impl OperationKind {
    /// Get all operations in execution order
    pub fn all() -> [OperationKind; 4] {
        [
            OperationKind::CreateRepo,
            OperationKind::CreateIssue,
            OperationKind::CreateFile,
            OperationKind::DeleteRepo,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::CreateRepo => "Create repository",
            OperationKind::CreateIssue => "Create issue",
            OperationKind::CreateFile => "Create file",
            OperationKind::DeleteRepo => "Delete repository",
        }
    }

    pub fn verb(&self) -> Verb {
        match self {
            OperationKind::CreateRepo | OperationKind::CreateIssue => Verb::Post,
            OperationKind::CreateFile => Verb::Put,
            OperationKind::DeleteRepo => Verb::Delete,
        }
    }

    pub fn expected_status(&self) -> u16 {
        match self {
            OperationKind::DeleteRepo => 204,
            _ => 201,
        }
    }

    /// Endpoint path relative to the versioned API root
    pub fn endpoint(&self, user: &str, subject: &TestSubject) -> String {
        match self {
            OperationKind::CreateRepo => "user/repos".to_string(),
            OperationKind::CreateIssue => format!("repos/{user}/{subject}/issues"),
            OperationKind::CreateFile => {
                format!("repos/{user}/{subject}/contents/{TEST_FILE_PATH}")
            }
            OperationKind::DeleteRepo => format!("repos/{user}/{subject}"),
        }
    }

    pub fn payload(&self, subject: &TestSubject) -> Option<Value> {
        match self {
            OperationKind::CreateRepo => Some(json!({ "name": subject.name })),
            OperationKind::CreateIssue => Some(json!({ "title": ISSUE_TITLE })),
            OperationKind::CreateFile => Some(json!({
                "message": TEST_FILE_PATH,
                "content": STANDARD.encode(TEST_FILE_CONTENT),
            })),
            OperationKind::DeleteRepo => None,
        }
    }

    /// Instantiate this step for a concrete user and subject
    pub fn instantiate(&self, user: &str, subject: &TestSubject) -> Operation {
        Operation {
            kind: *self,
            verb: self.verb(),
            endpoint: self.endpoint(user, subject),
            expected_status: self.expected_status(),
            payload: self.payload(subject),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully resolved API call ready to hand to the caller
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub verb: Verb,
    pub endpoint: String,
    pub expected_status: u16,
    pub payload: Option<Value>,
}
