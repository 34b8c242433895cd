pub mod generated;

use convoy_api::candidate;
use convoy_api::provider::StaticProvider;

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentDto {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherDto {
    pub name: String,
}

impl Student {
    pub fn to_dto(self) -> StudentDto {
        StudentDto { name: self.name }
    }
}

impl Teacher {
    pub fn to_dto(self) -> TeacherDto {
        TeacherDto { name: self.name }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Roster {
    pub names: Vec<String>,
}

impl Roster {
    // Not a conversion: borrowed receiver, primitive return.
    pub fn to_dto(&self) -> usize {
        self.names.len()
    }
}

// Not a conversion: name outside the convention.
pub fn to_record(value: Student) -> StudentDto {
    StudentDto { name: value.name }
}

/// Every conversion the demo registers for runtime dispatch. The generated
/// artifact in [`generated`] covers the same pairs statically.
pub fn provider() -> StaticProvider {
    StaticProvider::new()
        .with(candidate!(Student::to_dto))
        .with(candidate!(Teacher::to_dto))
}
