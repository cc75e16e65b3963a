pub mod configuration;

pub mod function {
    pub mod sample;
    pub mod mathfunction;

    pub mod tabulatedfunction {
        pub mod tabulatedfunctionerror;
        pub mod tabulatedfunction;
        pub mod arraytabulatedfunction;
        pub mod linkedlisttabulatedfunction;
        pub mod tabulatedfunctionfactory;
    }
}

pub mod operation {
    pub mod operationerror;
    pub mod differentialoperator;
    pub mod tabulatedfunctionoperationservice;
    pub mod tabulateddifferentialoperator;
    pub mod steppingdifferentialoperator;
}

pub mod concurrent {
    pub mod synchronizedtabulatedfunction;
}

pub mod io {
    pub mod functionioerror;
    pub mod binarycodec;
    pub mod textcodec;
    pub mod jsoncodec;
}
