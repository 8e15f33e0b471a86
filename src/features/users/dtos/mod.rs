mod user_dto;

pub use user_dto::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, RegisterResponseDto, UserResponseDto,
};
