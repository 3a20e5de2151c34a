//! Domain layer
//! 휴머나이즈/탐지 규칙(값 객체, 프롬프트 정책, 결과 추출, 실행 상태)을 외부 의존성 없이 표현한다.

pub mod completion;
pub mod detection;
pub mod humanize;
pub mod policy;
pub mod state;
