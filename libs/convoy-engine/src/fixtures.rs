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

pub fn student() -> Student {
    Student { name: "Ann".into() }
}

pub fn teacher() -> Teacher {
    Teacher { name: "Bo".into() }
}

pub fn people() -> StaticProvider {
    StaticProvider::new()
        .with(candidate!(Student::to_dto))
        .with(candidate!(Teacher::to_dto))
}

/// `people` with the student conversion registered twice.
pub fn duplicated() -> StaticProvider {
    people().with(candidate!(Student::to_dto))
}
