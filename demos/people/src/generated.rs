// @generated by dispatch-gen. Regenerate instead of editing.

use std::any::{Any, TypeId};

use convoy_api::error::ConvertError;

pub fn convert<Output: 'static, Input: 'static>(value: Input) -> Result<Output, ConvertError> {
    if TypeId::of::<Input>() == TypeId::of::<crate::Student>()
        && TypeId::of::<Output>() == TypeId::of::<crate::StudentDto>()
    {
        let boxed: Box<dyn Any> = Box::new(value);
        return match boxed.downcast::<crate::Student>() {
            Ok(input) => {
                let output: Box<dyn Any> = Box::new(crate::Student::to_dto(*input));
                match output.downcast::<Output>() {
                    Ok(output) => Ok(*output),
                    Err(_) => Err(ConvertError::not_registered::<Input, Output>()),
                }
            }
            Err(_) => Err(ConvertError::not_registered::<Input, Output>()),
        };
    }
    if TypeId::of::<Input>() == TypeId::of::<crate::Teacher>()
        && TypeId::of::<Output>() == TypeId::of::<crate::TeacherDto>()
    {
        let boxed: Box<dyn Any> = Box::new(value);
        return match boxed.downcast::<crate::Teacher>() {
            Ok(input) => {
                let output: Box<dyn Any> = Box::new(crate::Teacher::to_dto(*input));
                match output.downcast::<Output>() {
                    Ok(output) => Ok(*output),
                    Err(_) => Err(ConvertError::not_registered::<Input, Output>()),
                }
            }
            Err(_) => Err(ConvertError::not_registered::<Input, Output>()),
        };
    }
    Err(ConvertError::not_registered::<Input, Output>())
}
