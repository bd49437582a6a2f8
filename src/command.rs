//! FINS command frames and the opcode table.
//!
//! Every command is `header (10) | command code (2) | payload`. The builders on [`Command`]
//! validate their inputs, assemble the payload and return a frame ready for a transport:
//!
//! ## Memory Operations
//! - [`Command::memory_area_read`]
//! - [`Command::memory_area_write`]
//! - [`Command::memory_area_fill`]
//! - [`Command::multiple_memory_area_read`]
//! - [`Command::memory_area_transfer`]
//!
//! ## PLC Control
//! - [`Command::run`]
//! - [`Command::stop`]
//!
//! ## Forced I/O
//! - [`Command::forced_set_reset`]
//! - [`Command::forced_set_reset_cancel`]
//!
//! Any other entry of [`CommandCode`] can be sent with a caller-built payload through
//! [`Command::new`].
//!
//! # Example
//!
//! ```
//! use fins_driver::{Command, FinsHeader, MemoryAddress};
//!
//! let address = MemoryAddress::parse_text("D100").unwrap();
//! let cmd = Command::memory_area_read(FinsHeader::default(), address, 10).unwrap();
//! assert_eq!(
//!     cmd.to_bytes(),
//!     [0x80, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, // header
//!      0x01, 0x01,                                                 // memory area read
//!      0x82, 0x00, 0x64, 0x00,                                     // D100
//!      0x00, 0x0A]                                                 // 10 items
//! );
//! ```

use std::str::FromStr;

use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, FINS_HEADER_SIZE};
use crate::memory::{MemoryAddress, MEMORY_ADDRESS_SIZE};

/// Size of a command code on the wire.
pub const COMMAND_CODE_SIZE: usize = 2;

/// Program number addressing every program in the PLC.
pub const PROGRAM_ALL: u16 = 0xFFFF;

macro_rules! command_codes {
    ($($(#[$doc:meta])* $variant:ident = $code:literal, $name:literal;)+) => {
        /// FINS command codes (MRC and SRC as one big-endian `u16`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u16)]
        pub enum CommandCode {
            $($(#[$doc])* $variant = $code,)+
        }

        impl CommandCode {
            /// Every command code, in table order.
            pub const ALL: &'static [CommandCode] = &[$(CommandCode::$variant,)+];

            /// Returns the operation name.
            pub fn name(self) -> &'static str {
                match self {
                    $(CommandCode::$variant => $name,)+
                }
            }
        }
    };
}

command_codes! {
    /// Memory area read.
    MemoryAreaRead = 0x0101, "memory area read";
    /// Memory area write.
    MemoryAreaWrite = 0x0102, "memory area write";
    /// Memory area fill.
    MemoryAreaFill = 0x0103, "memory area fill";
    /// Multiple memory area read.
    MultipleMemoryAreaRead = 0x0104, "multiple memory area read";
    /// Memory area transfer.
    MemoryAreaTransfer = 0x0105, "memory area transfer";
    /// Parameter area read.
    ParameterAreaRead = 0x0201, "parameter area read";
    /// Parameter area write.
    ParameterAreaWrite = 0x0202, "parameter area write";
    /// Parameter area fill.
    ParameterAreaFill = 0x0203, "parameter area fill";
    /// Program area read.
    ProgramAreaRead = 0x0306, "program area read";
    /// Program area write.
    ProgramAreaWrite = 0x0307, "program area write";
    /// Program area clear.
    ProgramAreaClear = 0x0308, "program area clear";
    /// Run.
    Run = 0x0401, "run";
    /// Stop.
    Stop = 0x0402, "stop";
    /// CPU unit data read.
    CpuUnitDataRead = 0x0501, "CPU unit data read";
    /// Connection data read.
    ConnectionDataRead = 0x0502, "connection data read";
    /// CPU unit status read.
    CpuUnitStatusRead = 0x0601, "CPU unit status read";
    /// Cycle time read.
    CycleTimeRead = 0x0620, "cycle time read";
    /// Clock read.
    ClockRead = 0x0701, "clock read";
    /// Clock write.
    ClockWrite = 0x0702, "clock write";
    /// Message read.
    MessageRead = 0x0920, "message read";
    /// Access right acquire.
    AccessRightAcquire = 0x0C01, "access right acquire";
    /// Access right forced acquire.
    AccessRightForcedAcquire = 0x0C02, "access right forced acquire";
    /// Access right release.
    AccessRightRelease = 0x0C03, "access right release";
    /// Error clear.
    ErrorClear = 0x2101, "error clear";
    /// Error log read.
    ErrorLogRead = 0x2102, "error log read";
    /// Error log clear.
    ErrorLogClear = 0x2103, "error log clear";
    /// FINS write access log read.
    FinsWriteAccessLogRead = 0x2140, "FINS write access log read";
    /// FINS write access log clear.
    FinsWriteAccessLogClear = 0x2141, "FINS write access log clear";
    /// File name read.
    FileNameRead = 0x2201, "file name read";
    /// Single file read.
    SingleFileRead = 0x2202, "single file read";
    /// Single file write.
    SingleFileWrite = 0x2203, "single file write";
    /// File memory format.
    FileMemoryFormat = 0x2204, "file memory format";
    /// File delete.
    FileDelete = 0x2205, "file delete";
    /// File copy.
    FileCopy = 0x2207, "file copy";
    /// File name change.
    FileNameChange = 0x2208, "file name change";
    /// Memory area file transfer.
    MemoryAreaFileTransfer = 0x220A, "memory area file transfer";
    /// Parameter area file transfer.
    ParameterAreaFileTransfer = 0x220B, "parameter area file transfer";
    /// Program area file transfer.
    ProgramAreaFileTransfer = 0x220C, "program area file transfer";
    /// Directory create/delete.
    DirectoryCreateDelete = 0x2215, "directory create/delete";
    /// Memory cassette transfer.
    MemoryCassetteTransfer = 0x2220, "memory cassette transfer";
    /// Forced set/reset.
    ForcedSetReset = 0x2301, "forced set/reset";
    /// Forced set/reset cancel.
    ForcedSetResetCancel = 0x2302, "forced set/reset cancel";
    /// Convert to CompoWay/F command.
    ConvertToCompoWayF = 0x2803, "convert to CompoWay/F command";
    /// Convert to Modbus-RTU command.
    ConvertToModbusRtu = 0x2804, "convert to Modbus-RTU command";
    /// Convert to Modbus-ASCII command.
    ConvertToModbusAscii = 0x2805, "convert to Modbus-ASCII command";
}

impl CommandCode {
    /// Returns the command code as a `u16`.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Serializes the command code (MRC, SRC).
    pub fn to_bytes(self) -> [u8; COMMAND_CODE_SIZE] {
        self.code().to_be_bytes()
    }

    /// Looks up a command code.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::CommandCode;
    ///
    /// assert_eq!(CommandCode::from_code(0x2301), Some(CommandCode::ForcedSetReset));
    /// assert_eq!(CommandCode::from_code(0x0000), None);
    /// ```
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}

impl std::fmt::Display for CommandCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:04X})", self.name(), self.code())
    }
}

/// PLC operating mode for the Run command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlcMode {
    /// Debug mode.
    Debug,
    /// Monitor mode - run with monitoring enabled.
    Monitor,
    /// Run mode - normal execution.
    Run,
}

impl PlcMode {
    /// Returns the FINS code for this mode.
    pub fn code(self) -> u8 {
        match self {
            PlcMode::Debug => 0x01,
            PlcMode::Monitor => 0x02,
            PlcMode::Run => 0x04,
        }
    }
}

impl FromStr for PlcMode {
    type Err = FinsError;

    /// Parses `debug`, `monitor` or `run` (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(PlcMode::Debug),
            "monitor" => Ok(PlcMode::Monitor),
            "run" => Ok(PlcMode::Run),
            _ => Err(FinsError::unknown_mode(s)),
        }
    }
}

impl TryFrom<u8> for PlcMode {
    type Error = FinsError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0x01 => Ok(PlcMode::Debug),
            0x02 => Ok(PlcMode::Monitor),
            0x04 => Ok(PlcMode::Run),
            _ => Err(FinsError::unknown_mode(format!("0x{code:02X}"))),
        }
    }
}

impl std::fmt::Display for PlcMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlcMode::Debug => write!(f, "debug"),
            PlcMode::Monitor => write!(f, "monitor"),
            PlcMode::Run => write!(f, "run"),
        }
    }
}

/// Force sub-code of a forced set/reset entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForceCode {
    /// Force the bit OFF.
    Reset,
    /// Force the bit ON.
    Set,
    /// Release the forced state, leaving the bit OFF.
    ReleaseOff,
    /// Release the forced state, leaving the bit ON.
    ReleaseOn,
    /// Release the forced state, keeping the current value.
    Release,
}

impl ForceCode {
    /// Returns the FINS code for this force operation.
    pub fn code(self) -> u16 {
        match self {
            ForceCode::Reset => 0x0000,
            ForceCode::Set => 0x0001,
            ForceCode::ReleaseOff => 0x8000,
            ForceCode::ReleaseOn => 0x8001,
            ForceCode::Release => 0xFFFF,
        }
    }
}

/// One entry of a forced set/reset request: force code plus bit address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetResetSpec {
    /// Force operation.
    pub code: ForceCode,
    /// Target address.
    pub address: MemoryAddress,
}

impl SetResetSpec {
    /// Wire size of one entry.
    pub const SIZE: usize = 2 + MEMORY_ADDRESS_SIZE;

    /// Creates a new entry.
    pub fn new(code: ForceCode, address: MemoryAddress) -> Self {
        Self { code, address }
    }

    /// Creates a new entry from a text address.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`MemoryAddress::parse_text`].
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::{ForceCode, SetResetSpec};
    ///
    /// let spec = SetResetSpec::parse(ForceCode::Set, "CIO0.01").unwrap();
    /// assert_eq!(spec.to_bytes(), [0x00, 0x01, 0x30, 0x00, 0x00, 0x01]);
    /// ```
    pub fn parse(code: ForceCode, address: &str) -> Result<Self> {
        Ok(Self::new(code, MemoryAddress::parse_text(address)?))
    }

    /// Serializes the entry: force code (2) then address (4).
    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let [c0, c1] = self.code.code().to_be_bytes();
        let [a0, a1, a2, a3] = self.address.to_bytes();
        [c0, c1, a0, a1, a2, a3]
    }
}

/// A FINS command frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    header: FinsHeader,
    code: CommandCode,
    payload: Vec<u8>,
}

impl Command {
    /// Creates a command with a caller-built payload. The payload is not validated.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::{Command, CommandCode, FinsHeader};
    ///
    /// let cmd = Command::new(FinsHeader::default(), CommandCode::ClockRead, Vec::new());
    /// assert_eq!(&cmd.to_bytes()[10..], &[0x07, 0x01]);
    /// ```
    pub fn new(header: FinsHeader, code: CommandCode, payload: Vec<u8>) -> Self {
        Self {
            header,
            code,
            payload,
        }
    }

    /// Builds a memory area read: `address (4) | count (2)`.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidCount` if `count` is 0.
    pub fn memory_area_read(header: FinsHeader, address: MemoryAddress, count: u16) -> Result<Self> {
        check_count("count", count)?;
        let mut payload = Vec::with_capacity(MEMORY_ADDRESS_SIZE + 2);
        payload.extend_from_slice(&address.to_bytes());
        payload.extend_from_slice(&count.to_be_bytes());
        Ok(Self::new(header, CommandCode::MemoryAreaRead, payload))
    }

    /// Builds a memory area write: `address (4) | count (2) | data`.
    ///
    /// `data` is written as given. Its length is not checked against `count`; a mismatch
    /// yields a well-formed frame the PLC will reject or misinterpret.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidCount` if `count` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::{Command, FinsHeader, MemoryAddress};
    ///
    /// let address = MemoryAddress::parse_text("CIO100.1").unwrap();
    /// let cmd = Command::memory_area_write(FinsHeader::default(), address, 1, &[0x01]).unwrap();
    /// assert_eq!(cmd.payload(), &[0x30, 0x00, 0x64, 0x01, 0x00, 0x01, 0x01]);
    /// ```
    pub fn memory_area_write(
        header: FinsHeader,
        address: MemoryAddress,
        count: u16,
        data: &[u8],
    ) -> Result<Self> {
        Self::memory_area_with_data(header, CommandCode::MemoryAreaWrite, address, count, data)
    }

    /// Builds a memory area fill: `address (4) | count (2) | data`.
    ///
    /// `data` is the unit value repeated over `count` items; as with writes its length is
    /// the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidCount` if `count` is 0.
    pub fn memory_area_fill(
        header: FinsHeader,
        address: MemoryAddress,
        count: u16,
        data: &[u8],
    ) -> Result<Self> {
        Self::memory_area_with_data(header, CommandCode::MemoryAreaFill, address, count, data)
    }

    fn memory_area_with_data(
        header: FinsHeader,
        code: CommandCode,
        address: MemoryAddress,
        count: u16,
        data: &[u8],
    ) -> Result<Self> {
        check_count("count", count)?;
        let mut payload = Vec::with_capacity(MEMORY_ADDRESS_SIZE + 2 + data.len());
        payload.extend_from_slice(&address.to_bytes());
        payload.extend_from_slice(&count.to_be_bytes());
        payload.extend_from_slice(data);
        Ok(Self::new(header, code, payload))
    }

    /// Builds a multiple memory area read: one 4-byte address per item, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidCount` if `addresses` is empty.
    pub fn multiple_memory_area_read(
        header: FinsHeader,
        addresses: &[MemoryAddress],
    ) -> Result<Self> {
        if addresses.is_empty() {
            return Err(FinsError::invalid_count("addresses", 0));
        }
        let payload = addresses.iter().flat_map(|a| a.to_bytes()).collect();
        Ok(Self::new(header, CommandCode::MultipleMemoryAreaRead, payload))
    }

    /// Builds a memory area transfer: `source (4) | destination (4) | count (2)`.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidCount` if `count` is 0.
    pub fn memory_area_transfer(
        header: FinsHeader,
        source: MemoryAddress,
        destination: MemoryAddress,
        count: u16,
    ) -> Result<Self> {
        check_count("count", count)?;
        let mut payload = Vec::with_capacity(2 * MEMORY_ADDRESS_SIZE + 2);
        payload.extend_from_slice(&source.to_bytes());
        payload.extend_from_slice(&destination.to_bytes());
        payload.extend_from_slice(&count.to_be_bytes());
        Ok(Self::new(header, CommandCode::MemoryAreaTransfer, payload))
    }

    /// Builds a run command: `program number (2) | mode (1)`.
    ///
    /// `program: None` addresses every program ([`PROGRAM_ALL`]).
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::{Command, FinsHeader, PlcMode};
    ///
    /// let mode: PlcMode = "monitor".parse().unwrap();
    /// let cmd = Command::run(FinsHeader::default(), None, mode);
    /// assert_eq!(cmd.payload(), &[0xFF, 0xFF, 0x02]);
    /// ```
    pub fn run(header: FinsHeader, program: Option<u16>, mode: PlcMode) -> Self {
        let [hi, lo] = program.unwrap_or(PROGRAM_ALL).to_be_bytes();
        Self::new(header, CommandCode::Run, vec![hi, lo, mode.code()])
    }

    /// Builds a stop command (no payload).
    pub fn stop(header: FinsHeader) -> Self {
        Self::new(header, CommandCode::Stop, Vec::new())
    }

    /// Builds a forced set/reset: `count (2) | 6 bytes per entry`, order preserved.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidCount` if `specs` is empty or longer than `u16::MAX`.
    pub fn forced_set_reset(header: FinsHeader, specs: &[SetResetSpec]) -> Result<Self> {
        let count = u16::try_from(specs.len())
            .map_err(|_| FinsError::invalid_count("specs", specs.len()))?;
        check_count("specs", count)?;

        let mut payload = Vec::with_capacity(2 + specs.len() * SetResetSpec::SIZE);
        payload.extend_from_slice(&count.to_be_bytes());
        for spec in specs {
            payload.extend_from_slice(&spec.to_bytes());
        }
        Ok(Self::new(header, CommandCode::ForcedSetReset, payload))
    }

    /// Builds a forced set/reset cancel (no payload).
    pub fn forced_set_reset_cancel(header: FinsHeader) -> Self {
        Self::new(header, CommandCode::ForcedSetResetCancel, Vec::new())
    }

    /// Returns the header.
    pub fn header(&self) -> FinsHeader {
        self.header
    }

    /// Returns the command code.
    pub fn code(&self) -> CommandCode {
        self.code
    }

    /// Returns the payload that follows the command code.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the service ID.
    pub fn sid(&self) -> u8 {
        self.header.sid
    }

    /// Returns the frame size in bytes.
    pub fn len(&self) -> usize {
        FINS_HEADER_SIZE + COMMAND_CODE_SIZE + self.payload.len()
    }

    /// Returns `false`; a frame always carries a header and a code.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Serializes the command to bytes for transmission.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(&self.code.to_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

fn check_count(parameter: &'static str, count: u16) -> Result<()> {
    if count == 0 {
        return Err(FinsError::invalid_count(parameter, 0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::NodeAddress;

    fn header() -> FinsHeader {
        FinsHeader::new_command(NodeAddress::new(0, 10, 0), NodeAddress::new(0, 1, 0), 0x01)
    }

    fn addr(text: &str) -> MemoryAddress {
        MemoryAddress::parse_text(text).unwrap()
    }

    fn frame_hex(cmd: &Command) -> String {
        hex::encode(cmd.to_bytes())
    }

    const HEADER_HEX: &str = "800002000a0000010001";

    #[test]
    fn test_command_code_table() {
        assert_eq!(CommandCode::ALL.len(), 45);
        assert_eq!(CommandCode::MemoryAreaRead.to_bytes(), [0x01, 0x01]);
        assert_eq!(CommandCode::MemoryAreaTransfer.code(), 0x0105);
        assert_eq!(CommandCode::Run.code(), 0x0401);
        assert_eq!(CommandCode::Stop.code(), 0x0402);
        assert_eq!(CommandCode::ForcedSetResetCancel.code(), 0x2302);
        assert_eq!(CommandCode::ConvertToModbusAscii.code(), 0x2805);
        for code in CommandCode::ALL {
            assert_eq!(CommandCode::from_code(code.code()), Some(*code));
        }
    }

    #[test]
    fn test_command_code_display() {
        assert_eq!(
            CommandCode::MultipleMemoryAreaRead.to_string(),
            "multiple memory area read (0x0104)"
        );
    }

    #[test]
    fn test_memory_area_read_serialization() {
        let cmd = Command::memory_area_read(header(), addr("D100"), 10).unwrap();
        assert_eq!(cmd.len(), 18);
        assert_eq!(frame_hex(&cmd), format!("{HEADER_HEX}010182006400000a"));
    }

    #[test]
    fn test_memory_area_read_zero_count() {
        let result = Command::memory_area_read(header(), addr("D100"), 0);
        assert!(matches!(
            result,
            Err(FinsError::InvalidCount { parameter: "count", count: 0 })
        ));
    }

    #[test]
    fn test_memory_area_write_serialization() {
        let cmd =
            Command::memory_area_write(header(), addr("D100"), 2, &[0x12, 0x34, 0x56, 0x78]).unwrap();
        assert_eq!(
            frame_hex(&cmd),
            format!("{HEADER_HEX}010282006400000212345678")
        );
    }

    #[test]
    fn test_memory_area_write_does_not_check_data_length() {
        // Two items declared, one byte supplied: still a structurally valid frame.
        let cmd = Command::memory_area_write(header(), addr("D100"), 2, &[0xFF]).unwrap();
        assert_eq!(cmd.payload(), &[0x82, 0x00, 0x64, 0x00, 0x00, 0x02, 0xFF]);
    }

    #[test]
    fn test_memory_area_fill_serialization() {
        let cmd = Command::memory_area_fill(header(), addr("D100"), 50, &[0xAB, 0xCD]).unwrap();
        assert_eq!(cmd.len(), 20);
        assert_eq!(frame_hex(&cmd), format!("{HEADER_HEX}010382006400 0032abcd").replace(' ', ""));
        assert!(Command::memory_area_fill(header(), addr("D100"), 0, &[0, 0]).is_err());
    }

    #[test]
    fn test_multiple_memory_area_read_serialization() {
        let addresses = [addr("D100"), addr("D200"), addr("CIO0.05")];
        let cmd = Command::multiple_memory_area_read(header(), &addresses).unwrap();

        // Header (10) + code (2) + 3 * address (4)
        assert_eq!(cmd.len(), 24);
        assert_eq!(
            frame_hex(&cmd),
            format!("{HEADER_HEX}0104 82006400 8200c800 30000005").replace(' ', "")
        );
    }

    #[test]
    fn test_multiple_memory_area_read_empty() {
        assert!(matches!(
            Command::multiple_memory_area_read(header(), &[]),
            Err(FinsError::InvalidCount { .. })
        ));
    }

    #[test]
    fn test_memory_area_transfer_serialization() {
        let cmd = Command::memory_area_transfer(header(), addr("D100"), addr("D200"), 10).unwrap();
        assert_eq!(
            frame_hex(&cmd),
            format!("{HEADER_HEX}0105 82006400 8200c800 000a").replace(' ', "")
        );
        assert!(Command::memory_area_transfer(header(), addr("D100"), addr("D200"), 0).is_err());
    }

    #[test]
    fn test_run_command_serialization() {
        let cmd = Command::run(header(), None, PlcMode::Monitor);
        assert_eq!(cmd.len(), 15);
        assert_eq!(frame_hex(&cmd), format!("{HEADER_HEX}0401ffff02"));

        let cmd = Command::run(header(), Some(0x0003), PlcMode::Debug);
        assert_eq!(cmd.payload(), &[0x00, 0x03, 0x01]);
    }

    #[test]
    fn test_plc_mode_tokens() {
        assert_eq!("debug".parse::<PlcMode>().unwrap(), PlcMode::Debug);
        assert_eq!("MONITOR".parse::<PlcMode>().unwrap(), PlcMode::Monitor);
        assert_eq!("run".parse::<PlcMode>().unwrap().code(), 0x04);
        assert!(matches!(
            "program".parse::<PlcMode>(),
            Err(FinsError::UnknownMode { .. })
        ));
        assert_eq!(PlcMode::try_from(0x02).unwrap(), PlcMode::Monitor);
        assert!(PlcMode::try_from(0x03).is_err());
    }

    #[test]
    fn test_stop_and_cancel_have_no_payload() {
        let stop = Command::stop(header());
        assert_eq!(frame_hex(&stop), format!("{HEADER_HEX}0402"));

        let cancel = Command::forced_set_reset_cancel(header());
        assert_eq!(frame_hex(&cancel), format!("{HEADER_HEX}2302"));
    }

    #[test]
    fn test_forced_set_reset_serialization() {
        let specs = [
            SetResetSpec::parse(ForceCode::Set, "CIO0.00").unwrap(),
            SetResetSpec::parse(ForceCode::Reset, "CIO0.01").unwrap(),
            SetResetSpec::new(ForceCode::Release, addr("W3.4")),
        ];
        let cmd = Command::forced_set_reset(header(), &specs).unwrap();

        // Header (10) + code (2) + count (2) + 3 * spec (6)
        assert_eq!(cmd.len(), 32);
        assert_eq!(
            frame_hex(&cmd),
            format!("{HEADER_HEX}2301 0003 000130000000 000030000001 ffff31000304").replace(' ', "")
        );
    }

    #[test]
    fn test_forced_set_reset_empty() {
        assert!(matches!(
            Command::forced_set_reset(header(), &[]),
            Err(FinsError::InvalidCount { parameter: "specs", .. })
        ));
    }

    #[test]
    fn test_force_codes() {
        assert_eq!(ForceCode::Reset.code(), 0x0000);
        assert_eq!(ForceCode::Set.code(), 0x0001);
        assert_eq!(ForceCode::ReleaseOff.code(), 0x8000);
        assert_eq!(ForceCode::ReleaseOn.code(), 0x8001);
        assert_eq!(ForceCode::Release.code(), 0xFFFF);
    }

    #[test]
    fn test_generic_command() {
        let cmd = Command::new(header(), CommandCode::AccessRightAcquire, vec![0xFF, 0xFF]);
        assert_eq!(cmd.code(), CommandCode::AccessRightAcquire);
        assert_eq!(cmd.sid(), 0x01);
        assert_eq!(frame_hex(&cmd), format!("{HEADER_HEX}0c01ffff"));
    }
}
